#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use material_todo_api::auth::TokenService;
use material_todo_api::config::AppConfig;
use material_todo_api::database::MemoryStore;
use material_todo_api::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

/// The real router served on a free port, backed by a fresh `MemoryStore`.
///
/// Each test gets its own server: `#[tokio::test]` builds a runtime per test,
/// and the server task dies with it.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = Arc::new(AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            "APP_STORAGE" => Some("memory".to_string()),
            _ => None,
        }));
        let tokens = TokenService::from_config(&config.security)?;
        let store = Arc::new(MemoryStore::new());

        let router = app(AppState::new(config, tokens.clone(), store.clone()));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            store,
            tokens,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn signup(&self, full_name: &str, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&json!({ "full_name": full_name, "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Create an account and return a bearer token for it
    pub async fn register(&self, email: &str) -> Result<String> {
        let res = self.signup("Test User", email, "secret1").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

        let res = self.login(email, "secret1").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url(path)).bearer_auth(token).json(body).send().await?)
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Result<reqwest::Response> {
        Ok(self.client.put(self.url(path)).bearer_auth(token).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }
}

pub async fn ensure_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
