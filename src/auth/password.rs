//! One-way password digests.
//!
//! Argon2id with the crate defaults and a 16-byte salt drawn from the OS
//! entropy source. Digests are stored as PHC strings so the parameters travel
//! with the hash.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Produce a salted digest of `password` suitable for long-term storage
pub fn hash_password(password: &str) -> Result<String, HashingError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| HashingError::Entropy(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| HashingError::Hash(e.to_string()))?;

    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HashingError::Hash(e.to_string()))?
        .to_string();
    Ok(digest)
}

/// Check `password` against a stored digest. A malformed digest is a mismatch.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// `hash_password` on the blocking pool; argon2 is deliberately slow
pub async fn hash_password_blocking(password: String) -> Result<String, HashingError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| HashingError::Hash(e.to_string()))?
}

/// `verify_password` on the blocking pool
pub async fn verify_password_blocking(password: String, digest: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .unwrap_or(false)
}
