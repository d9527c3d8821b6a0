use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Image reference stored when a user signs up without one
pub const DEFAULT_AVATAR: &str = "uploads/default_avatar.png";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    /// Argon2 PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
    pub image: String,
}

/// Row to insert at signup; `password_hash` is already digested
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
}

/// Public profile returned by `GET /api/user/getUserInfo`
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub image: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            image: user.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: 1,
            full_name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "$argon2id$v=19$...".to_string(),
            image: DEFAULT_AVATAR.to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ann@x.com");
    }
}
