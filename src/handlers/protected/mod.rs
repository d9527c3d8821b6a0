// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every handler takes the `Identity` extractor, which rejects the request
// with 401 before the handler body runs. Stores are queried with the
// caller's user id so one account never sees another's rows.

pub mod notes;
pub mod task_groups;
pub mod tasks;
pub mod user;

use crate::error::ApiError;

/// Parse a numeric path id. Anything that is not an id cannot name a row,
/// so it answers with the same 404 as a missing one.
pub fn parse_id(raw: &str, not_found: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::not_found(not_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn non_numeric_id_is_not_found() {
        assert_eq!(parse_id("42", "Note not found").unwrap(), 42);

        let err = parse_id("abc", "Note not found").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Note not found");
    }
}
