pub mod todo_list_service;

pub use todo_list_service::TodoListService;
