mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get("/health").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = TestServer::spawn().await?;

    let body = server.get("/").await?.json::<Value>().await?;
    assert_eq!(body["name"], "DevTeams API");
    assert!(body["endpoints"]["resources"].is_array());
    Ok(())
}

#[tokio::test]
async fn token_endpoint_is_public_and_issues_jwts() -> Result<()> {
    let server = TestServer::spawn().await?;

    let token = server.token().await?;
    assert_eq!(token.split('.').count(), 3, "not a JWT: {}", token);
    assert_ne!(token, server.token().await?);
    Ok(())
}

#[tokio::test]
async fn writes_without_token_are_unauthorized() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/Team"))
        .json(&json!({"name": "Core"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let res = server.client.delete(server.url("/api/Team/1")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Nothing was written
    let teams = server.get("/api/Team").await?.json::<Value>().await?;
    assert_eq!(teams, json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_tokens_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let other = TestServer::spawn().await?;

    for auth in ["Bearer not-a-jwt", "Basic Zm9vOmJhcg=="] {
        let res = server
            .client
            .post(server.url("/api/Role"))
            .header("Authorization", auth)
            .json(&json!({"name": "Lead"}))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", auth);
    }

    // Same key, so a token from another instance is accepted
    let res = server
        .client
        .post(server.url("/api/Role"))
        .bearer_auth(other.token().await?)
        .json(&json!({"name": "Lead"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn reads_need_no_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    for path in ["/api/ProjectType", "/api/Team", "/api/Role", "/api/Developer", "/api/Project"] {
        let res = server.get(path).await?;
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
    }
    Ok(())
}
