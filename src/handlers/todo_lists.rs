use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::warn;
use uuid::Uuid;

use crate::database::models::{CreateTodoListRequest, TodoListResponse, UpdateTodoListRequest};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::AppState;

/// POST /api/v1/todolists
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoListRequest>, JsonRejection>,
) -> ApiResult<TodoListResponse> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "invalid todo list create payload");
        ApiError::bad_request("invalid request payload")
    })?;

    let fields = request.validate().map_err(|field_errors| {
        warn!(?field_errors, "todo list create validation failed");
        ApiError::unprocessable_entity(field_errors)
    })?;

    let todo_list = state
        .todo_list_service
        .create_todo_list(fields)
        .await
        .map_err(|e| ApiError::from_repository(e, "could not create todo list"))?;

    Ok(ApiResponse::created(todo_list))
}

/// GET /api/v1/todolists
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<TodoListResponse>> {
    let todo_lists = state
        .todo_list_service
        .list_todo_lists()
        .await
        .map_err(|e| ApiError::from_repository(e, "could not fetch todo lists"))?;

    Ok(ApiResponse::success(todo_lists))
}

/// GET /api/v1/todolists/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TodoListResponse> {
    let id = parse_id(&id)?;

    let todo_list = state
        .todo_list_service
        .get_todo_list(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "could not fetch todo list"))?;

    Ok(ApiResponse::success(todo_list))
}

/// PUT /api/v1/todolists/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoListRequest>, JsonRejection>,
) -> ApiResult<TodoListResponse> {
    let id = parse_id(&id)?;

    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "invalid todo list update payload");
        ApiError::bad_request("invalid request payload")
    })?;

    let fields = request.validate().map_err(|field_errors| {
        warn!(?field_errors, "todo list update validation failed");
        ApiError::unprocessable_entity(field_errors)
    })?;

    let todo_list = state
        .todo_list_service
        .update_todo_list(id, fields)
        .await
        .map_err(|e| ApiError::from_repository(e, "could not update todo list"))?;

    Ok(ApiResponse::success(todo_list))
}

/// DELETE /api/v1/todolists/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;

    state
        .todo_list_service
        .delete_todo_list(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "could not delete todo list"))?;

    Ok(ApiResponse::no_content())
}

/// A non-UUID path segment is a client error, never a lookup miss.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("invalid todo list id"))
}
