//! Integration tests for the projects API.

use axum::http::StatusCode;
use serde_json::json;

use atelier_integration_tests::{TestContext, body_json, delete, get, post_json, put_json};

#[tokio::test]
async fn test_full_crud_flow() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    // Create: first entity gets id 1.
    let response = ctx
        .send(post_json(
            "/api/projects",
            &json!({
                "title": "X",
                "description": "first project",
                "tags": ["rust"],
                "featured": true,
            }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;
    assert_eq!(first["id"], 1);
    assert_eq!(first["title"], "X");
    assert_eq!(first["created_at"], first["updated_at"]);

    // Second create gets id 2.
    let response = ctx
        .send(post_json(
            "/api/projects",
            &json!({ "title": "Y", "description": "second project" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], 2);

    // List is public and ordered by insertion.
    let response = ctx.send(get("/api/projects", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let titles: Vec<&str> = list
        .as_array()
        .expect("list is an array")
        .iter()
        .map(|p| p["title"].as_str().expect("title is a string"))
        .collect();
    assert_eq!(titles, vec!["X", "Y"]);

    // Get by id is public.
    let response = ctx.send(get("/api/projects/1", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "X");

    // Update merges only the provided fields.
    let response = ctx
        .send(put_json(
            "/api/projects/1",
            &json!({ "title": "X (renamed)" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "X (renamed)");
    assert_eq!(updated["description"], "first project");
    assert_eq!(updated["tags"], json!(["rust"]));

    // Delete returns the removed entity.
    let response = ctx.send(delete("/api/projects/1", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "X (renamed)");

    // And it is really gone.
    let response = ctx.send(get("/api/projects/1", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_blank_title_is_rejected() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    let response = ctx
        .send(post_json(
            "/api/projects",
            &json!({ "title": "   ", "description": "blank title" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "title must not be blank");

    let list = body_json(ctx.send(get("/api/projects", None)).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_get_absent_project_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.send(get("/api/projects/999", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_delete_absent_project_leaves_document_unchanged() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    ctx.send(post_json(
        "/api/projects",
        &json!({ "title": "Keep", "description": "survives" }),
        Some(&cookie),
    ))
    .await;

    let before = std::fs::read(ctx.document_path("projects")).expect("document exists");

    let response = ctx.send(delete("/api/projects/999", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = std::fs::read(ctx.document_path("projects")).expect("document exists");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_absent_project_is_not_found() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    let response = ctx
        .send(put_json(
            "/api/projects/7",
            &json!({ "title": "Ghost" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_document_layout_on_disk() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    ctx.send(post_json(
        "/api/projects",
        &json!({ "title": "Durable", "description": "outlives the process" }),
        Some(&cookie),
    ))
    .await;

    // The persisted layout is exactly { "projects": [...] }, readable by a
    // fresh process.
    let raw = std::fs::read_to_string(ctx.document_path("projects")).expect("document exists");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("document is JSON");
    assert_eq!(parsed["projects"][0]["title"], "Durable");
    assert_eq!(parsed["projects"][0]["id"], 1);
    assert!(parsed["projects"][0]["created_at"].is_string());
}
