pub mod health;
pub mod todo_lists;
