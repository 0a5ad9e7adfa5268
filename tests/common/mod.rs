#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use toolcategory_verify::core::config::VerifyConfig;
use toolcategory_verify::store::{MemorySubmissionStore, SubmissionRecord};
use toolcategory_verify::AppState;
use tower::ServiceExt;

pub const BADGE_IMG: &str = r#"<img src="https://toolcategory.com/badge-light.svg" alt="Featured on ToolCategory.com" width="200" height="54" />"#;

pub fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

pub fn verified_page() -> String {
    format!(
        r#"<!doctype html><html><body><h1>Acme Tool</h1>
        <a href="https://toolcategory.com/" target="_blank" rel="noopener">{BADGE_IMG}</a>
        </body></html>"#
    )
}

pub fn bare_page() -> String {
    r#"<!doctype html><html><body><a href="https://other.com">Other</a></body></html>"#.to_string()
}

/// Padding first, then the required elements, so a small cap cuts them off.
pub fn oversized_page(padding: usize) -> String {
    let mut html = String::from("<!doctype html><html><body><p>");
    html.push_str(&"x".repeat(padding));
    html.push_str("</p>");
    html.push_str(&verified_page());
    html.push_str("</body></html>");
    html
}

/// A throw-away "maker site" on 127.0.0.1 serving fixed fixtures.
pub async fn spawn_maker_site() -> SocketAddr {
    let app = Router::new()
        .route("/", get(|| async { Html(verified_page()) }))
        .route("/bare", get(|| async { Html(bare_page()) }))
        .route(
            "/link-only",
            get(|| async { Html(r#"<a href="https://toolcategory.com/?ref=acme">ToolCategory</a>"#) }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/moved", get(|| async { Redirect::temporary("/") }))
        .route("/huge", get(|| async { Html(oversized_page(20_000)) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html(verified_page())
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind maker site");
    let addr = listener.local_addr().expect("maker site addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

pub fn test_config() -> VerifyConfig {
    VerifyConfig {
        fetch_timeout_secs: Some(1),
        max_body_bytes: Some(4_096),
        environment: Some("test".to_string()),
        ..Default::default()
    }
}

pub fn test_state(store: Arc<MemorySubmissionStore>) -> Arc<AppState> {
    Arc::new(
        AppState::new(test_config())
            .expect("build state")
            .with_store(store),
    )
}

pub fn store_with(ids: &[&str]) -> Arc<MemorySubmissionStore> {
    Arc::new(MemorySubmissionStore::with_submissions(
        ids.iter().map(|id| SubmissionRecord::new(*id)),
    ))
}

pub async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = toolcategory_verify::router(state)
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_verify(state: Arc<AppState>, body: Value) -> (StatusCode, Value) {
    post_raw(state, body.to_string()).await
}

pub async fn post_raw(state: Arc<AppState>, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/verify-badge")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build request");
    send(state, request).await
}
