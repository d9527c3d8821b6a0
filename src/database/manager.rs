use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// A unique constraint rejected the write (e.g. a second account for one email)
    #[error("Duplicate value: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Turn a unique-violation (SQLSTATE 23505) into `Conflict`, pass the rest through
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return DatabaseError::Conflict(constraint);
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Table definitions created at startup when missing
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        full_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        image TEXT NOT NULL DEFAULT 'uploads/default_avatar.png'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS task_groups (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        icon_data INTEGER NOT NULL DEFAULT 0,
        background_color TEXT NOT NULL DEFAULT '',
        icon_color TEXT NOT NULL DEFAULT '',
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        task_group_id BIGINT NOT NULL REFERENCES task_groups(id) ON DELETE CASCADE,
        start_date TIMESTAMPTZ,
        finish_date TIMESTAMPTZ,
        status TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS notes_user_id_idx ON notes (user_id)",
    "CREATE INDEX IF NOT EXISTS task_groups_user_id_idx ON task_groups (user_id)",
    "CREATE INDEX IF NOT EXISTS tasks_task_group_id_idx ON tasks (task_group_id)",
];

/// Connection pool setup and schema bootstrap for the Postgres backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the connection pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = config.connection_url()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(
            "Connected to PostgreSQL at {}:{}/{} (max {} connections)",
            config.host, config.port, config.name, config.max_connections
        );
        Ok(pool)
    }

    /// Create any missing tables and indexes
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_statements_are_idempotent() {
        for statement in SCHEMA {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "statement must be safe to rerun: {}",
                statement
            );
        }
    }

    #[test]
    fn email_is_unique_in_schema() {
        assert!(SCHEMA[0].contains("email TEXT NOT NULL UNIQUE"));
    }
}
