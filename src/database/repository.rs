use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{TodoList, TodoListFields};

/// Errors surfaced by the persistence gateway. `NotFound` is a sentinel the
/// layers above match on directly; everything else is an opaque store failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("todo list not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Persistence operations for todo lists. Implemented by the Postgres gateway
/// and by test doubles.
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// Insert a new row. The repository stamps both timestamps; the returned
    /// entity reflects what was persisted.
    async fn create(&self, id: Uuid, fields: TodoListFields) -> Result<TodoList, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<TodoList, RepositoryError>;

    /// All rows, most recently created first. Empty is a valid result.
    async fn find_all(&self) -> Result<Vec<TodoList>, RepositoryError>;

    /// Persist the full current state of an existing entity and refresh
    /// `updated_at`. Callers fetch the current row first; the two round-trips
    /// are not atomic and concurrent updates are last-write-wins.
    async fn update(&self, todo_list: TodoList) -> Result<TodoList, RepositoryError>;

    /// Hard delete. `NotFound` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

pub struct PgTodoListRepository {
    pool: PgPool,
}

impl PgTodoListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoListRepository for PgTodoListRepository {
    async fn create(&self, id: Uuid, fields: TodoListFields) -> Result<TodoList, RepositoryError> {
        let todo_list = sqlx::query_as::<_, TodoList>(
            "INSERT INTO todo_lists (id, title, description, created_at, updated_at) \
             VALUES ($1, $2, $3, now(), now()) \
             RETURNING id, title, description, created_at, updated_at",
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo_list)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<TodoList, RepositoryError> {
        sqlx::query_as::<_, TodoList>(
            "SELECT id, title, description, created_at, updated_at \
             FROM todo_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<TodoList>, RepositoryError> {
        let todo_lists = sqlx::query_as::<_, TodoList>(
            "SELECT id, title, description, created_at, updated_at \
             FROM todo_lists ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todo_lists)
    }

    async fn update(&self, todo_list: TodoList) -> Result<TodoList, RepositoryError> {
        sqlx::query_as::<_, TodoList>(
            "UPDATE todo_lists SET title = $2, description = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, title, description, created_at, updated_at",
        )
        .bind(todo_list.id)
        .bind(&todo_list.title)
        .bind(&todo_list.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
