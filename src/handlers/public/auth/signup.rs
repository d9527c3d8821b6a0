// handlers/public/auth/signup.rs - POST /api/auth/signup handler

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, JsonOrForm};
use crate::services::{AccountService, SignupData};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Reference to an already stored image; the default avatar when absent
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /api/auth/signup - Create an account
///
/// Responds 201 with an empty object. The account is not logged in; clients
/// follow up with `/api/auth/login`.
pub async fn signup(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<SignupRequest>,
) -> ApiResult<Value> {
    let accounts = AccountService::new(state.store.as_ref(), &state.tokens);
    accounts
        .signup(SignupData {
            full_name: request.full_name,
            email: request.email,
            password: request.password,
            image: request.image,
        })
        .await?;

    Ok(ApiResponse::created(json!({})))
}
