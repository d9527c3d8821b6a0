// handlers/protected/user.rs - /api/user/* handlers

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, Identity, JsonOrForm};
use crate::services::AccountService;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// GET /api/user/getUserInfo - `{id, full_name, email, image}` of the caller
pub async fn get_info(Identity(user): Identity) -> ApiResult<UserProfile> {
    Ok(ApiResponse::success(UserProfile::from(user)))
}

/// PUT /api/user/updateUserInfo - Change display name and/or image reference
///
/// Empty or missing fields keep their stored values. Responds `{}`.
pub async fn update_info(
    State(state): State<AppState>,
    Identity(user): Identity,
    JsonOrForm(update): JsonOrForm<ProfileUpdate>,
) -> ApiResult<Value> {
    let accounts = AccountService::new(state.store.as_ref(), &state.tokens);
    accounts
        .update_profile(&user, update.full_name.as_deref(), update.image.as_deref())
        .await?;

    Ok(ApiResponse::empty())
}
