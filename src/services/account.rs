use rand::Rng;
use thiserror::Error;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::{HashingError, TokenError, TokenService};
use crate::database::models::{NewUser, User, DEFAULT_AVATAR};
use crate::database::{DatabaseError, UserStore};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(&'static str),

    /// Unknown email and wrong password are deliberately the same error
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("User with this email already exists")]
    Conflict,

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(DatabaseError),
}

impl From<DatabaseError> for AccountError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(_) => AccountError::Conflict,
            other => AccountError::Storage(other),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupData {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}

/// Signup, login and password-reset rules on top of a user store
pub struct AccountService<'a, S: ?Sized> {
    users: &'a S,
    tokens: &'a TokenService,
}

impl<'a, S> AccountService<'a, S>
where
    S: UserStore + ?Sized,
{
    pub fn new(users: &'a S, tokens: &'a TokenService) -> Self {
        Self { users, tokens }
    }

    /// Create an account. The password is digested before it reaches storage.
    pub async fn signup(&self, data: SignupData) -> Result<User, AccountError> {
        if data.full_name.is_empty() || data.email.is_empty() || data.password.is_empty() {
            return Err(AccountError::Validation("Full Name, Email, and Password are required"));
        }

        let password_hash = hash_password_blocking(data.password).await?;
        let image = data
            .image
            .filter(|image| !image.is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        let user = self
            .users
            .insert_user(NewUser {
                full_name: data.full_name,
                email: data.email,
                password_hash,
                image,
            })
            .await?;

        tracing::info!("Created account {} for {}", user.id, user.email);
        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation("Email and password are required"));
        }

        let Some(user) = self.users.find_user_by_email(email).await? else {
            tracing::info!("Login failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password_blocking(password.to_string(), user.password).await {
            tracing::info!("Login failed: wrong password for account {}", user.id);
            return Err(AccountError::InvalidCredentials);
        }

        Ok(self.tokens.issue(&user.email)?)
    }

    /// Return a fresh six-digit code for an existing account.
    ///
    /// The code is neither stored nor checked later; `reset_password` only
    /// needs the email.
    pub async fn request_reset_code(&self, email: &str) -> Result<String, AccountError> {
        if self.users.find_user_by_email(email).await?.is_none() {
            return Err(AccountError::NotFound);
        }
        Ok(generate_reset_code())
    }

    /// Replace the stored digest for `email` unconditionally
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), AccountError> {
        if self.users.find_user_by_email(email).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        let password_hash = hash_password_blocking(new_password.to_string()).await?;
        if !self.users.update_user_password(email, &password_hash).await? {
            return Err(AccountError::NotFound);
        }

        tracing::info!("Password reset for {}", email);
        Ok(())
    }

    /// Apply the non-empty fields of a profile update
    pub async fn update_profile(
        &self,
        user: &User,
        full_name: Option<&str>,
        image: Option<&str>,
    ) -> Result<(), AccountError> {
        let full_name = full_name.filter(|v| !v.is_empty()).unwrap_or(user.full_name.as_str());
        let image = image.filter(|v| !v.is_empty()).unwrap_or(user.image.as_str());
        self.users.update_user_profile(user.id, full_name, image).await?;
        Ok(())
    }
}

/// Six decimal digits, zero padded, uniform over 000000..=999999
pub fn generate_reset_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..=999_999);
    format!("{:06}", code)
}
