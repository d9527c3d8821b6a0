pub mod account;

pub use account::{generate_reset_code, AccountError, AccountService, SignupData};
