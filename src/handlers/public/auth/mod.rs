// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login;          // POST /api/auth/login
pub mod password_reset; // POST /api/auth/forget-password/*
pub mod signup;         // POST /api/auth/signup
pub mod validate;       // POST /api/auth/validate-token

pub use login::login;
pub use password_reset::{change_password, generate_code};
pub use signup::signup;
pub use validate::validate_token;
