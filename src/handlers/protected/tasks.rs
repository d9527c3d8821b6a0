// handlers/protected/tasks.rs - /api/tasks/* handlers
//
// Tasks belong to users through their group. Listings come back as task
// views carrying the group's name.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::app::AppState;
use crate::database::models::{Task, TaskFilter, TaskInput, STATUS_IN_PROGRESS, STATUS_TODO};
use crate::error::ApiError;
use crate::middleware::{json_body, ApiResponse, ApiResult, Identity};

const NOT_FOUND: &str = "Task not found";
const GROUP_NOT_FOUND: &str = "Task group not found";
const INVALID_BODY: &str = "Invalid request data";

#[derive(Debug, Deserialize)]
pub struct FinishDateQuery {
    pub finish_date: Option<String>,
}

/// POST /api/tasks/createTask - 201 `{}`
///
/// ```json
/// {
///   "title": "Write report",
///   "description": "Quarterly numbers",
///   "task_group_id": 1,
///   "start_date": "2025-03-10T09:00:00Z",
///   "finish_date": "2025-03-14T17:00:00Z",
///   "status": "TODO"
/// }
/// ```
///
/// The group must belong to the caller, otherwise 404.
pub async fn create(
    State(state): State<AppState>,
    Identity(user): Identity,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<Value> {
    let input = json_body(payload, INVALID_BODY)?;
    if state.store.find_task_group(user.id, input.task_group_id).await?.is_none() {
        return Err(ApiError::not_found(GROUP_NOT_FOUND));
    }

    let id = state.store.create_task(&input).await?;
    tracing::debug!("Created task {} in group {}", id, input.task_group_id);

    Ok(ApiResponse::created(json!({})))
}

pub async fn list(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<Vec<Task>> {
    Ok(ApiResponse::success(state.store.list_tasks(user.id, TaskFilter::All).await?))
}

pub async fn list_todo(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<Vec<Task>> {
    let tasks = state.store.list_tasks(user.id, TaskFilter::Status(STATUS_TODO)).await?;
    Ok(ApiResponse::success(tasks))
}

pub async fn list_in_progress(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<Vec<Task>> {
    let tasks = state
        .store
        .list_tasks(user.id, TaskFilter::Status(STATUS_IN_PROGRESS))
        .await?;
    Ok(ApiResponse::success(tasks))
}

/// GET /api/tasks/getTask/finish-date?finish_date=YYYY-MM-DD
///
/// Tasks whose finish date falls on that calendar day (UTC), wrapped as
/// `{"tasks": [...]}`.
pub async fn list_by_finish_date(
    State(state): State<AppState>,
    Identity(user): Identity,
    Query(query): Query<FinishDateQuery>,
) -> ApiResult<Value> {
    let day = parse_finish_date(query.finish_date.as_deref())?;
    let tasks = state.store.list_tasks(user.id, TaskFilter::FinishDate(day)).await?;

    Ok(ApiResponse::success(json!({ "tasks": tasks })))
}

fn parse_finish_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Finish date is required"))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("Invalid date format. Use YYYY-MM-DD"))
}

pub async fn get(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Task> {
    let id = parse_id(&id, NOT_FOUND)?;
    let task = state
        .store
        .find_task(user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(task))
}

/// PUT /api/tasks/updateTask/:id - Merge non-empty fields, respond `{}`
///
/// Moving a task to another group requires that group to be the caller's.
pub async fn update(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    let mut task = state
        .store
        .find_task(user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let update = json_body(payload, INVALID_BODY)?;
    if update.task_group_id != 0
        && update.task_group_id != task.task_group_id
        && state.store.find_task_group(user.id, update.task_group_id).await?.is_none()
    {
        return Err(ApiError::not_found(GROUP_NOT_FOUND));
    }

    task.apply(update);
    state.store.save_task(user.id, &task).await?;

    Ok(ApiResponse::empty())
}

pub async fn delete(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if let Ok(id) = id.parse::<i64>() {
        state.store.delete_task(user.id, id).await?;
    }
    Ok(ApiResponse::message("Task deleted successfully"))
}
