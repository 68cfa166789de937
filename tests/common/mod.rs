//! Shared helpers for the integration test suites

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use ielts_prep_server::{run_migrations, AppState, Config};

/// Create a test configuration pointed at the given LLM endpoint
pub fn test_config(llm_base_url: &str) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0, // Random port
        database_url: "sqlite::memory:".to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        llm_base_url: llm_base_url.to_string(),
        llm_api_key: "test-key".to_string(),
        llm_model: "test-model".to_string(),
        session_ttl_hours: 24,
        environment: "test".to_string(),
    }
}

/// Create a migrated in-memory database
///
/// A single connection keeps the in-memory database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    run_migrations(&pool).await.expect("Migrations failed");

    pool
}

/// Create a test app router plus a handle on its pool
pub async fn test_app(llm_base_url: &str) -> (SqlitePool, Router) {
    let pool = test_pool().await;
    let state = AppState::new(pool.clone(), test_config(llm_base_url)).unwrap();
    (pool, ielts_prep_server::routes::router(state))
}

/// Serve a test app on a real port for reqwest-based clients
pub async fn spawn_app(llm_base_url: &str) -> (SqlitePool, String) {
    let (pool, app) = test_app(llm_base_url).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (pool, format!("http://{addr}"))
}

/// Spawn a stub chat-completions provider that always answers with `content`
pub async fn spawn_llm_stub(content: &str) -> String {
    let content = content.to_string();
    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let content = content.clone();
            async move {
                Json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": content } }]
                }))
            }
        }),
    );

    serve_stub(app).await
}

/// Spawn a stub provider that fails every request
pub async fn spawn_llm_failure_stub() -> String {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );

    serve_stub(app).await
}

async fn serve_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Create a request with an optional bearer token and optional JSON body
pub fn make_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Parse a response body as JSON
pub async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sign up a fresh user and return (token, user_id)
pub async fn signup_user(app: &Router, email: &str) -> (String, String) {
    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": email, "password": "password123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    (
        body["token"].as_str().unwrap().to_string(),
        body["userId"].as_str().unwrap().to_string(),
    )
}
