pub mod identity;
pub mod password;
pub mod token;

pub use identity::{bearer_token, IdentityError, IdentityResolver};
pub use password::{hash_password, verify_password, HashingError};
pub use token::{Claims, TokenError, TokenService};
