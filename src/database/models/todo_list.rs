use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted todo list row. Timestamps are stamped by the repository, not by
/// callers.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TodoList {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoListRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoListRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response DTO exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoList {
    pub fn into_response(self) -> TodoListResponse {
        TodoListResponse {
            id: self.id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1024;

/// Validated field values shared by create and update, since both carry the
/// same payload shape and rules.
#[derive(Debug, Clone)]
pub struct TodoListFields {
    pub title: String,
    pub description: String,
}

fn validate_fields(
    title: Option<&str>,
    description: Option<&str>,
) -> Result<TodoListFields, HashMap<String, String>> {
    let mut errors = HashMap::new();

    let title = title.unwrap_or_default();
    let title_chars = title.chars().count();
    if title_chars < TITLE_MIN_CHARS || title_chars > TITLE_MAX_CHARS {
        errors.insert(
            "title".to_string(),
            format!(
                "title is required and must be between {} and {} characters",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            ),
        );
    }

    let description = description.unwrap_or_default();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.insert(
            "description".to_string(),
            format!("description must be at most {} characters", DESCRIPTION_MAX_CHARS),
        );
    }

    if errors.is_empty() {
        Ok(TodoListFields {
            title: title.to_string(),
            description: description.to_string(),
        })
    } else {
        Err(errors)
    }
}

impl CreateTodoListRequest {
    pub fn validate(&self) -> Result<TodoListFields, HashMap<String, String>> {
        validate_fields(self.title.as_deref(), self.description.as_deref())
    }
}

impl UpdateTodoListRequest {
    pub fn validate(&self) -> Result<TodoListFields, HashMap<String, String>> {
        validate_fields(self.title.as_deref(), self.description.as_deref())
    }
}
