use axum::response::Json;
use serde_json::{json, Value};

pub async fn hello_world() -> &'static str {
    tracing::info!("Root path '/' was accessed!");
    "Hello World!"
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
