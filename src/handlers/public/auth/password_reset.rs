// handlers/public/auth/password_reset.rs - forget-password handlers
//
// POST /api/auth/forget-password/generateCode
// POST /api/auth/forget-password/changePassword
//
// The code is shown to the client and never checked afterwards; changing the
// password needs only the email. Both bodies are JSON only.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{json_body, ApiResponse, ApiResult};
use crate::services::AccountService;

#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Returns `{"code": "NNNNNN"}` for an existing account
pub async fn generate_code(
    State(state): State<AppState>,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let request = json_body(payload, "Invalid email")?;
    if request.email.is_empty() {
        return Err(ApiError::bad_request("Invalid email"));
    }

    let accounts = AccountService::new(state.store.as_ref(), &state.tokens);
    let code = accounts.request_reset_code(&request.email).await?;

    Ok(ApiResponse::success(json!({ "code": code })))
}

/// Overwrites the password for `email`
pub async fn change_password(
    State(state): State<AppState>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let request = json_body(payload, "Invalid input")?;
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Invalid input"));
    }

    let accounts = AccountService::new(state.store.as_ref(), &state.tokens);
    accounts.reset_password(&request.email, &request.password).await?;

    Ok(ApiResponse::empty())
}
