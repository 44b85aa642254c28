// Shared between test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use todolist_api::config::{AppConfig, Config, DatabaseConfig, JwtConfig};
use todolist_api::database::models::{TodoList, TodoListFields};
use todolist_api::database::repository::{RepositoryError, TodoListRepository};
use todolist_api::services::TodoListService;
use todolist_api::{app, AppState};

/// In-memory stand-in for the Postgres gateway. Timestamps come from a
/// deterministic tick so creation order and update ordering are strict.
pub struct InMemoryTodoListRepository {
    rows: Mutex<Vec<TodoList>>,
    base: DateTime<Utc>,
    tick: AtomicI64,
    calls: AtomicUsize,
}

impl InMemoryTodoListRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            base: Utc::now(),
            tick: AtomicI64::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let tick = self.tick.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::milliseconds(tick)
    }

    /// How many persistence operations have been invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoListRepository for InMemoryTodoListRepository {
    async fn create(&self, id: Uuid, fields: TodoListFields) -> Result<TodoList, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.next_timestamp();
        let todo_list = TodoList {
            id,
            title: fields.title,
            description: fields.description,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(todo_list.clone());
        Ok(todo_list)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<TodoList, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<TodoList>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, todo_list: TodoList) -> Result<TodoList, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let updated_at = self.next_timestamp();
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == todo_list.id)
            .ok_or(RepositoryError::NotFound)?;
        row.title = todo_list.title;
        row.description = todo_list.description;
        row.updated_at = updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub fn test_config(auth_enabled: bool) -> Config {
    Config {
        app: AppConfig {
            name: "todolist-api-test".to_string(),
            port: 0,
            debug: false,
        },
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "todolist_test".to_string(),
            ssl_mode: "disable".to_string(),
            max_open_conns: 1,
            max_idle_conns: 1,
            max_idle_time_secs: 30,
            max_life_time_secs: 300,
        },
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "todolist".to_string(),
            ttl_secs: 3600,
            auth_enabled,
        },
    }
}

/// Router over the in-memory repository, plus the repository handle for
/// asserting on persistence calls.
pub fn test_app(auth_enabled: bool) -> (Router, Arc<InMemoryTodoListRepository>) {
    let repository = Arc::new(InMemoryTodoListRepository::new());
    let state = AppState {
        config: Arc::new(test_config(auth_enabled)),
        todo_list_service: TodoListService::new(repository.clone()),
    };
    (app(state), repository)
}

pub async fn send_json(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    router.clone().oneshot(request).await.unwrap()
}

/// Send a raw (possibly malformed) body with a JSON content type.
pub async fn send_raw(router: &Router, method: &str, path: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_status_and_body(
    response: Response<Body>,
    expected: StatusCode,
) -> Value {
    assert_eq!(response.status(), expected);
    body_json(response).await
}
