mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn team_create_and_duplicate() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.post("/api/Team", &json!({"name": "Core"})).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()[header::LOCATION], "/api/Team/1");
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "name": "Core"}));

    let res = server.post("/api/Team", &json!({"name": "Core"})).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "A team with the name 'Core' already exists.");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["name"].is_string());

    let teams = server.get("/api/Team").await?.json::<Value>().await?;
    assert_eq!(teams, json!([{"id": 1, "name": "Core"}]));
    Ok(())
}

#[tokio::test]
async fn missing_name_is_a_validation_error() -> Result<()> {
    let server = TestServer::spawn().await?;

    for body in [json!({}), json!({"name": ""}), json!({"name": "   "})] {
        let res = server.post("/api/Role", &body).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", body);
        let err = res.json::<Value>().await?;
        assert_eq!(err["message"], "Name is required.");
    }
    assert_eq!(server.get("/api/Role").await?.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.token().await?;

    let res = server
        .client
        .post(server.url("/api/Team"))
        .bearer_auth(token)
        .header(header::CONTENT_TYPE, "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn get_unknown_and_non_integer_ids() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get("/api/Team/42").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "NOT_FOUND");

    let res = server.get("/api/Team/abc").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn project_type_updates_through_action_path() -> Result<()> {
    let server = TestServer::spawn().await?;
    let created = server.create("/api/ProjectType", &json!({"name": "Web"})).await?;
    let id = created["id"].as_i64().unwrap_or_default();

    let res = server
        .put(&format!("/api/ProjectType/updateprojecttype/{}", id), &json!({"name": "Mobile"}))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": id, "name": "Mobile"}));

    // The plain item path does not accept PUT for project types
    let res = server
        .put(&format!("/api/ProjectType/{}", id), &json!({"name": "Desktop"}))
        .await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let shown = server.get(&format!("/api/ProjectType/{}", id)).await?.json::<Value>().await?;
    assert_eq!(shown["name"], "Mobile");
    Ok(())
}

#[tokio::test]
async fn update_rules() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create("/api/Team", &json!({"name": "Core"})).await?;
    server.create("/api/Team", &json!({"name": "Web"})).await?;

    // Keeping its own name is fine
    let res = server.put("/api/Team/2", &json!({"name": "Web"})).await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Taking another team's name is not
    let res = server.put("/api/Team/2", &json!({"name": "Core"})).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.put("/api/Team/9", &json!({"name": "Ops"})).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let team = server.get("/api/Team/2").await?.json::<Value>().await?;
    assert_eq!(team["name"], "Web");
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create("/api/Role", &json!({"name": "Lead"})).await?;

    let res = server.delete("/api/Role/1").await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    assert_eq!(server.get("/api/Role/1").await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete("/api/Role/1").await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn referenced_team_cannot_be_deleted() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create("/api/Team", &json!({"name": "Core"})).await?;
    server.create("/api/Role", &json!({"name": "Lead"})).await?;
    server
        .create(
            "/api/Developer",
            &json!({"firstname": "Ada", "lastname": "Lovelace", "roleId": 1, "teamId": 1}),
        )
        .await?;

    let res = server.delete("/api/Team/1").await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["code"], "CONFLICT");
    assert_eq!(server.get("/api/Team/1").await?.status(), StatusCode::OK);
    Ok(())
}
