//! Health check handlers

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service metadata endpoint used by the mobile app to probe the API
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "alive".to_string(),
        service: "LeafLens API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
