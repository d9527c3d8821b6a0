// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation, login, password reset and the static policy documents.
// `validate-token` lives here too: it reads the bearer header itself and
// reports on it instead of rejecting the request up front.

pub mod auth;
pub mod documents;
