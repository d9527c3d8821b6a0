use serde::{Deserialize, Serialize};
use std::env;

use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; wins over the individual `DB_*` parts when set
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub storage: StorageBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. `from_env` passes
    /// the process environment; tests pass a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = lookup("DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = lookup("APP_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("APP_STORAGE") {
            self.api.storage = match v.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                _ => StorageBackend::Postgres,
            };
        }

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                ..DatabaseConfig::default()
            },
            api: ApiConfig {
                port: 2525,
                storage: StorageBackend::Postgres,
            },
            security: SecurityConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                ..DatabaseConfig::default()
            },
            api: ApiConfig {
                port: 2525,
                storage: StorageBackend::Postgres,
            },
            security: SecurityConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                ..DatabaseConfig::default()
            },
            api: ApiConfig {
                port: 2525,
                storage: StorageBackend::Postgres,
            },
            security: SecurityConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "postgres".to_string(),
            max_connections: 10,
            connection_timeout: 30,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiry_hours: 24,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL for the pool. Assembled from the `DB_*` parts when no
    /// explicit URL was configured; TLS is disabled in that case.
    pub fn connection_url(&self) -> Result<String, DatabaseError> {
        if let Some(url) = &self.url {
            url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("postgres://localhost").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_host(Some(&self.host)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_port(Some(self.port)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(&self.user).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        url.set_path(&format!("/{}", self.name));
        url.set_query(Some("sslmode=disable"));
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_development() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api.port, 2525);
        assert_eq!(config.api.storage, StorageBackend::Postgres);
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert!(config.security.jwt_secret.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("APP_STORAGE", "memory"),
            ("DATABASE_MAX_CONNECTIONS", "7"),
        ]));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.security.jwt_secret, "s3cret");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.storage, StorageBackend::Memory);
        assert_eq!(config.database.max_connections, 7);
    }

    #[test]
    fn unparsable_numbers_keep_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty"), ("JWT_EXPIRY_HOURS", "x")]));
        assert_eq!(config.api.port, 2525);
        assert_eq!(config.security.jwt_expiry_hours, 24);
    }

    #[test]
    fn builds_connection_url_from_parts() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "todo"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "material_todo"),
        ]));
        let url = config.database.connection_url().unwrap();
        assert_eq!(url, "postgres://todo:pw@db.internal:6543/material_todo?sslmode=disable");
    }

    #[test]
    fn explicit_url_wins() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@localhost:5432/app"),
            ("DB_HOST", "ignored"),
        ]));
        assert_eq!(
            config.database.connection_url().unwrap(),
            "postgres://u:p@localhost:5432/app"
        );
    }

    #[test]
    fn rejects_garbage_url() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "not a url")]));
        assert!(matches!(
            config.database.connection_url(),
            Err(DatabaseError::InvalidDatabaseUrl)
        ));
    }
}
