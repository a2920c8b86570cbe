use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome! The farmer advisory API with spoken answers is ready."
    }))
}
