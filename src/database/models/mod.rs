pub mod todo_list;

pub use todo_list::{CreateTodoListRequest, TodoList, TodoListFields, TodoListResponse, UpdateTodoListRequest};
