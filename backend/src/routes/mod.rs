//! Route definitions for the LeafLens backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check / service metadata
        .route("/ping", get(handlers::ping))
        // Main scan endpoint: image upload, prediction, treatment, risk
        .route("/predict", post(handlers::predict))
        // Treatment details for a specific disease
        .route("/treatment/:disease_name", get(handlers::get_treatment_detail))
        // TFLite model download + metadata for offline mobile inference
        .route("/model/download", get(handlers::download_tflite_model))
        .route("/model/info", get(handlers::model_info))
}
