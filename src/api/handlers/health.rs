use axum::response::Json;

pub async fn handle() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "toolcategory-verify",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
