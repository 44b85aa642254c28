use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::database::models::{TodoListFields, TodoListResponse};
use crate::database::repository::{RepositoryError, TodoListRepository};

/// Orchestrates todo list operations over the persistence gateway. No business
/// rules beyond field copy-through; `NotFound` passes upward untouched.
#[derive(Clone)]
pub struct TodoListService {
    repository: Arc<dyn TodoListRepository>,
}

impl TodoListService {
    pub fn new(repository: Arc<dyn TodoListRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_todo_list(
        &self,
        fields: TodoListFields,
    ) -> Result<TodoListResponse, RepositoryError> {
        let id = Uuid::new_v4();
        let todo_list = self.repository.create(id, fields).await.map_err(|e| {
            error!(error = %e, "create todo list failed");
            e
        })?;

        info!(id = %todo_list.id, "todo list created");
        Ok(todo_list.into_response())
    }

    pub async fn get_todo_list(&self, id: Uuid) -> Result<TodoListResponse, RepositoryError> {
        let todo_list = self.repository.find_by_id(id).await.map_err(|e| {
            if !e.is_not_found() {
                error!(id = %id, error = %e, "get todo list failed");
            }
            e
        })?;

        Ok(todo_list.into_response())
    }

    pub async fn list_todo_lists(&self) -> Result<Vec<TodoListResponse>, RepositoryError> {
        let todo_lists = self.repository.find_all().await.map_err(|e| {
            error!(error = %e, "list todo lists failed");
            e
        })?;

        Ok(todo_lists.into_iter().map(|t| t.into_response()).collect())
    }

    pub async fn update_todo_list(
        &self,
        id: Uuid,
        fields: TodoListFields,
    ) -> Result<TodoListResponse, RepositoryError> {
        let mut todo_list = self.repository.find_by_id(id).await.map_err(|e| {
            if !e.is_not_found() {
                error!(id = %id, error = %e, "retrieve todo list for update failed");
            }
            e
        })?;

        // Wholesale replacement, not a partial patch.
        todo_list.title = fields.title;
        todo_list.description = fields.description;

        let updated = self.repository.update(todo_list).await.map_err(|e| {
            if !e.is_not_found() {
                error!(id = %id, error = %e, "update todo list failed");
            }
            e
        })?;

        info!(id = %id, "todo list updated");
        Ok(updated.into_response())
    }

    pub async fn delete_todo_list(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repository.delete(id).await.map_err(|e| {
            if !e.is_not_found() {
                error!(id = %id, error = %e, "delete todo list failed");
            }
            e
        })?;

        info!(id = %id, "todo list deleted");
        Ok(())
    }
}
