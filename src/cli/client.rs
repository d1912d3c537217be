use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::handlers::auth::TokenResponse;
use crate::resource::Resource;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Thin HTTP client for a running DevTeams API.
#[derive(Debug, Clone)]
pub struct DevTeamsClient {
    base_url: String,
    http: reqwest::Client,
}

impl DevTeamsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn info(&self) -> Result<Value, ClientError> {
        self.send(Method::GET, "/", None, None).await
    }

    /// `/health` answers 503 with a body when degraded; both are returned.
    pub async fn health(&self) -> Result<(StatusCode, Value), ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }

    pub async fn token(&self) -> Result<String, ClientError> {
        let response: TokenResponse = self.send(Method::POST, "/api/Auth/token", None, None).await?;
        Ok(response.token)
    }

    pub async fn list(&self, resource: Resource) -> Result<Value, ClientError> {
        self.send(Method::GET, &resource.collection_path(), None, None).await
    }

    pub async fn get(&self, resource: Resource, id: i32) -> Result<Value, ClientError> {
        self.send(Method::GET, &resource.item_path(id), None, None).await
    }

    pub async fn create(&self, resource: Resource, body: Value) -> Result<Value, ClientError> {
        let token = self.token().await?;
        self.send(Method::POST, &resource.collection_path(), Some(&token), Some(body))
            .await
    }

    pub async fn update(&self, resource: Resource, id: i32, body: Value) -> Result<Value, ClientError> {
        let token = self.token().await?;
        self.send(Method::PUT, &resource.update_path(id), Some(&token), Some(body))
            .await
    }

    pub async fn delete(&self, resource: Resource, id: i32) -> Result<(), ClientError> {
        let token = self.token().await?;
        let response = self
            .http
            .delete(self.url(&resource.item_path(id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await.map(drop)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Turns non-2xx responses into `ClientError::Api` using the error body's message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        Err(ClientError::Api { status, message })
    }
}
