use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn health_checker_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "FlowMind API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
