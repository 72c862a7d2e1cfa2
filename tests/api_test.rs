//! HTTP-level tests: status codes and JSON bodies of every route.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use graphrag_api::api;
use graphrag_api::config::Config;
use graphrag_api::state::AppState;

use common::FakeEngine;

const BOUNDARY: &str = "graphrag-test-boundary";

fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        projects_dir: dir.path().join("projects"),
        ..Config::default()
    };
    let state = AppState::with_engine(config, Arc::new(FakeEngine::default())).unwrap();
    (dir, api::router(state))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(uri: &str, files: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn create_project(app: &Router) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/create_project",
            json!({"text_content": "Alice founded Acme.", "api_key": "sk-test"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Project created successfully.");
    body["project_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_and_list() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let req = Request::builder()
        .uri("/projects")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "projects": [id] }));
}

#[tokio::test]
async fn test_create_without_key_is_bad_request() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        &app,
        post_json("/create_project", json!({"text_content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("api_key"));
}

#[tokio::test]
async fn test_create_with_unknown_provider_is_bad_request() {
    let (_dir, app) = test_app();
    let (status, body) = send(
        &app,
        post_json(
            "/create_project",
            json!({"text_content": "hello", "api_key": "k", "llm": "anthropic"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_unknown_project_is_404() {
    let (_dir, app) = test_app();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(
        &app,
        post_json(&format!("/query/{missing}"), json!({"query": "q"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Project not found."}));

    let (status, _) = send(&app, post_json(&format!("/index/{missing}"), json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/project/{missing}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, multipart(&format!("/upload_txt/{missing}"), &[("a.txt", "a")])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_before_index_is_400() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let (status, body) = send(
        &app,
        post_json(&format!("/query/{id}"), json!({"query": "who?", "method": "local"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Project has not been indexed yet.");
}

#[tokio::test]
async fn test_index_with_empty_body_then_query() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!("/index/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"project_id": id, "message": "Indexing process started and completed."})
    );

    let (status, body) = send(
        &app,
        post_json(&format!("/query/{id}"), json!({"query": "Who founded Acme?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_id"], id.as_str());
    assert_eq!(body["query"], "Who founded Acme?");
    assert_eq!(body["method"], "global");
    assert_eq!(body["response"], "global answer to: Who founded Acme?");
    assert!(body["context_data"].is_string());

    let (status, body) = send(
        &app,
        post_json(&format!("/query/{id}"), json!({"query": "q", "method": "hybrid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid search method: hybrid");
}

#[tokio::test]
async fn test_index_dry_run() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let (status, body) = send(
        &app,
        post_json(&format!("/index/{id}"), json!({"dry_run": true, "verbose": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dry run completed. Configuration is valid.");

    // Still not indexed
    let (status, _) = send(&app, post_json(&format!("/query/{id}"), json!({"query": "q"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_with_malformed_body_is_400() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!("/index/{id}"))
        .header("content-type", "application/json")
        .body(Body::from("{\"method\": 7"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid index request"));
}

#[tokio::test]
async fn test_upload_files() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let (status, body) = send(
        &app,
        multipart(
            &format!("/upload_txt/{id}"),
            &[("one.txt", "first"), ("two.txt", "second"), ("..", "bad")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project_id"], id.as_str());
    assert_eq!(
        body["message"],
        "Processed 3 files. 2 successful, 1 failed."
    );
    assert_eq!(body["results"]["successful"], json!(["one.txt", "two.txt"]));
    assert_eq!(body["results"]["failed"][0]["filename"], "..");
}

#[tokio::test]
async fn test_upload_all_failed_is_400_with_results() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let (status, body) = send(
        &app,
        multipart(&format!("/upload_txt/{id}"), &[("..", "bad")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"]["message"], "No files could be uploaded.");
    assert_eq!(body["detail"]["results"]["successful"], json!([]));
    assert_eq!(body["detail"]["results"]["failed"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_project() {
    let (_dir, app) = test_app();
    let id = create_project(&app).await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/project/{id}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"project_id": id, "message": "Project deleted successfully."})
    );

    let (status, _) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = Request::builder()
        .uri("/projects")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, req).await;
    assert_eq!(body, json!({"projects": []}));
}
