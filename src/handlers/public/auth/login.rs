// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, JsonOrForm};
use crate::services::AccountService;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login - Exchange credentials for a bearer token
///
/// Accepts a JSON body or form fields:
/// ```json
/// { "email": "ann@example.com", "password": "secret1" }
/// ```
///
/// Returns `{"token": "<jwt>"}`. Unknown email and wrong password both
/// answer 401 `Invalid credentials`.
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<LoginRequest>,
) -> ApiResult<Value> {
    let accounts = AccountService::new(state.store.as_ref(), &state.tokens);
    let token = accounts.login(&request.email, &request.password).await?;

    Ok(ApiResponse::success(json!({ "token": token })))
}
