#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use beatsmith_core::entity_creator::SlugRetryPolicy;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use beatsmith_api::config::ServerConfig;
use beatsmith_api::middleware::auth::USER_ID_HEADER;
use beatsmith_api::router::build_app_router;
use beatsmith_api::state::AppState;

/// User id sent by the request helpers below.
pub const TEST_USER: i64 = 1;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        slug_policy: SlugRetryPolicy::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`], the same builder `main.rs` uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<i64>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET as [`TEST_USER`].
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Some(TEST_USER), None).await
}

/// GET as an explicit user, or anonymously with `None`.
pub async fn get_as(app: Router, uri: &str, user: Option<i64>) -> Response {
    send(app, Method::GET, uri, user, None).await
}

/// POST a JSON body as [`TEST_USER`].
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(TEST_USER), Some(body)).await
}

/// POST a JSON body as an explicit user, or anonymously with `None`.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    user: Option<i64>,
) -> Response {
    send(app, Method::POST, uri, user, Some(body)).await
}

/// PUT a JSON body as [`TEST_USER`].
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(TEST_USER), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A three-beat story plan body.
pub fn three_act_plan(slug: &str) -> serde_json::Value {
    serde_json::json!({
        "slug": slug,
        "name": "Three Act",
        "beats": [
            {
                "key": "setup",
                "name": "Setup",
                "key_points": ["status quo"],
                "purpose": "Introduce the world",
                "max_scenes": 3
            },
            {"key": "confrontation", "name": "Confrontation", "purpose": "Escalate"},
            {"key": "resolution", "name": "Resolution", "min_scenes": 1}
        ]
    })
}

/// Beats content using `keys` in the given order.
pub fn beats(keys: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        keys.iter()
            .map(|key| {
                serde_json::json!({
                    "key": key,
                    "title": format!("{key} title"),
                    "content": format!("{key} content"),
                })
            })
            .collect(),
    )
}
