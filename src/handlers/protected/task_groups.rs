// handlers/protected/task_groups.rs - /api/tasks_groups/* handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use super::parse_id;
use crate::app::AppState;
use crate::database::models::{TaskGroup, TaskGroupInput, TaskGroupPatch};
use crate::error::ApiError;
use crate::middleware::{json_body, ApiResponse, ApiResult, Identity};

const NOT_FOUND: &str = "Task group not found";
const INVALID_BODY: &str = "Invalid input";

/// POST /api/tasks_groups/createTaskGroup - 201 `{}`
///
/// ```json
/// { "name": "Work", "icon_data": 57344, "background_color": "#FFE0B2", "icon_color": "#FB8C00" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Identity(user): Identity,
    payload: Result<Json<TaskGroupInput>, JsonRejection>,
) -> ApiResult<Value> {
    let input = json_body(payload, INVALID_BODY)?;
    if input.name.is_empty() {
        return Err(ApiError::bad_request(INVALID_BODY));
    }

    let group = state.store.create_task_group(user.id, &input).await?;
    tracing::debug!("Created task group {} for user {}", group.id, user.id);

    Ok(ApiResponse::created(serde_json::json!({})))
}

pub async fn list(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<Vec<TaskGroup>> {
    Ok(ApiResponse::success(state.store.list_task_groups(user.id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<TaskGroup> {
    let id = parse_id(&id, NOT_FOUND)?;
    let group = state
        .store
        .find_task_group(user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(group))
}

/// PUT /api/tasks_groups/updateTaskGroup/:id - Merge the supplied fields
pub async fn update(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    payload: Result<Json<TaskGroupPatch>, JsonRejection>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    let mut group = state
        .store
        .find_task_group(user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    group.apply(json_body(payload, INVALID_BODY)?);
    state.store.save_task_group(&group).await?;

    Ok(ApiResponse::empty())
}

/// DELETE /api/tasks_groups/deleteTaskGroup/:id - Removes the group's tasks too
pub async fn delete(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if let Ok(id) = id.parse::<i64>() {
        state.store.delete_task_group(user.id, id).await?;
    }
    Ok(ApiResponse::message("Task group deleted successfully"))
}
