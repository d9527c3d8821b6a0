use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::Store;
use crate::error::ApiError;
use crate::handlers::{protected, public};

/// Shared, read-only request state built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, tokens: TokenService, store: Arc<dyn Store>) -> Self {
        Self { config, tokens, store }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Public
        .merge(auth_routes())
        .merge(document_routes())
        // Protected (bearer token)
        .merge(user_routes())
        .merge(note_routes())
        .merge(task_group_routes())
        .merge(task_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/forget-password/generateCode", post(auth::generate_code))
        .route("/api/auth/forget-password/changePassword", post(auth::change_password))
        .route("/api/auth/validate-token", post(auth::validate_token))
}

fn document_routes() -> Router<AppState> {
    use public::documents;

    Router::new()
        .route("/api/documents/getPolicy", get(documents::policy))
        .route("/api/documents/getPrivacy", get(documents::privacy))
}

fn user_routes() -> Router<AppState> {
    use axum::routing::put;
    use protected::user;

    Router::new()
        .route("/api/user/getUserInfo", get(user::get_info))
        .route("/api/user/updateUserInfo", put(user::update_info))
}

fn note_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use protected::notes;

    Router::new()
        .route("/api/notes/createNote", post(notes::create))
        .route("/api/notes/getAllNotes", get(notes::list))
        .route("/api/notes/getNote/:id", get(notes::get))
        .route("/api/notes/updateNote/:id", put(notes::update))
        .route("/api/notes/deleteNote/:id", delete(notes::delete))
}

fn task_group_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use protected::task_groups;

    Router::new()
        .route("/api/tasks_groups/createTaskGroup", post(task_groups::create))
        .route("/api/tasks_groups/getTasksGroup", get(task_groups::list))
        .route("/api/tasks_groups/getTaskGroup/:id", get(task_groups::get))
        .route("/api/tasks_groups/updateTaskGroup/:id", put(task_groups::update))
        .route("/api/tasks_groups/deleteTaskGroup/:id", delete(task_groups::delete))
}

fn task_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use protected::tasks;

    Router::new()
        .route("/api/tasks/createTask", post(tasks::create))
        .route("/api/tasks/getAllTasks", get(tasks::list))
        // static segments win over `:id` in axum's router
        .route("/api/tasks/getTask/finish-date", get(tasks::list_by_finish_date))
        .route("/api/tasks/getTask/:id", get(tasks::get))
        .route("/api/tasks/updateTask/:id", put(tasks::update))
        .route("/api/tasks/deleteTask/:id", delete(tasks::delete))
        .route("/api/tasks/getTasks/todo", get(tasks::list_todo))
        .route("/api/tasks/getTasks/in_progress", get(tasks::list_in_progress))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.ping().await {
        Ok(_) => Ok(Json(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok"
        }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
