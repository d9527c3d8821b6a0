// handlers/public/auth/validate.rs - POST /api/auth/validate-token handler

use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, Subject};

/// Check the bearer token without touching storage.
///
/// Returns `{"valid": true, "email": "<subject>"}`; any header or token
/// problem is rejected by the `Subject` extractor with 401.
pub async fn validate_token(Subject(email): Subject) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "valid": true, "email": email })))
}
