pub mod auth;
pub mod logger;
pub mod recovery;
pub mod response;

pub use auth::jwt_auth_middleware;
pub use logger::request_logger;
pub use recovery::handle_panic;
pub use response::{ApiResponse, ApiResult};
