use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use material_todo_api::auth::TokenService;
use material_todo_api::config::{AppConfig, StorageBackend};
use material_todo_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use material_todo_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(AppConfig::from_env());
    tracing::info!("Starting material-todo-api in {:?} mode", config.environment);

    let tokens = TokenService::from_config(&config.security).context("invalid JWT_SECRET or JWT_EXPIRY_HOURS")?;

    let store: Arc<dyn Store> = match config.api.storage {
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            DatabaseManager::ensure_schema(&pool)
                .await
                .context("failed to create tables")?;
            Arc::new(PgStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("APP_STORAGE=memory: data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    let router = app(AppState::new(config, tokens, store));
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
