pub mod auth;
pub mod body;
pub mod response;

pub use auth::{Identity, Subject};
pub use body::{json_body, JsonOrForm};
pub use response::{ApiResponse, ApiResult};
