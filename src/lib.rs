pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::services::TodoListService;

/// Per-request deadline applied at the routing layer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared dependencies, wired once at startup and injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub todo_list_service: TodoListService,
}

/// Build the application router: routes, then the middleware chain from
/// outermost to innermost: request id, timeout, panic recovery, request
/// logging.
pub fn app(state: AppState) -> Router {
    let mut todolist_routes = Router::new()
        .route(
            "/todolists",
            post(handlers::todo_lists::create).get(handlers::todo_lists::list),
        )
        .route(
            "/todolists/:id",
            get(handlers::todo_lists::get)
                .put(handlers::todo_lists::update)
                .delete(handlers::todo_lists::delete),
        );

    // Bearer auth is implemented but ships disabled on these routes.
    if state.config.jwt.auth_enabled {
        todolist_routes = todolist_routes.route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::jwt_auth_middleware,
        ));
    }

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", todolist_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CatchPanicLayer::custom(middleware::recovery::handle_panic))
                .layer(axum_middleware::from_fn(middleware::request_logger)),
        )
        .with_state(state)
}
