#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use devteams_api::auth::TokenIssuer;
use devteams_api::config::AppConfig;
use devteams_api::database::MemoryStore;
use devteams_api::{app, AppState};

pub const TEST_JWT_KEY: &str = "integration-test-signing-key";

/// A server on its own port with its own in-memory store.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.security.jwt_secret = Some(TEST_JWT_KEY.to_string());
        let tokens = TokenIssuer::from_config(&config.security)?;
        let state = AppState::new(Arc::new(MemoryStore::new()), tokens);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                tracing::error!("test server stopped: {}", e);
            }
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn token(&self) -> Result<String> {
        let res = self.client.post(self.url("/api/Auth/token")).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from response")
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Response> {
        let token = self.token().await?;
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Response> {
        let token = self.token().await?;
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        let token = self.token().await?;
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// POST that must answer 201; returns the created body.
    pub async fn create(&self, path: &str, body: &Value) -> Result<Value> {
        let res = self.post(path, body).await?;
        assert_eq!(res.status(), StatusCode::CREATED, "creating at {}", path);
        Ok(res.json().await?)
    }
}
