//! TFLite model download and metadata endpoints
//!
//! The mobile app can download a TFLite build of the classifier and run
//! inference locally without an internet connection. The info endpoint
//! lists what is available so the app can decide whether to update.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Response, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    /// Model version to download; version 2 is the quantized build
    pub version: Option<String>,
}

/// Serve a TFLite model file for offline inference.
pub async fn download_tflite_model(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> AppResult<Response<Body>> {
    let version = params.version.unwrap_or_else(|| "2".to_string());

    // The version names a file on disk; restrict it to a plain identifier
    if version.is_empty() || !version.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationError(format!(
            "Invalid model version: {:?}",
            version
        )));
    }

    let tflite_dir = PathBuf::from(&state.config.model.tflite_dir);
    let model_path = tflite_dir.join(format!("{}.tflite", version));

    let bytes = match tokio::fs::read(&model_path).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let available = list_available_versions(&tflite_dir).await;
            return Err(AppError::NotFound(format!(
                "TFLite model version '{}' (available: {})",
                version,
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            )));
        }
    };

    tracing::info!("TFLite model v{} downloaded ({} bytes)", version, bytes.len());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"leaflens_v{}.tflite\"", version),
        )
        .header("X-Model-Version", &version)
        .header("X-Model-Classes", "Early Blight,Late Blight,Healthy")
        .header("X-Model-Input-Size", "256x256")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("failed to build response: {}", e)))?;

    Ok(response)
}

#[derive(Debug, Serialize)]
pub struct TfliteModelEntry {
    pub version: String,
    pub filename: String,
    pub size_bytes: u64,
    pub size_kb: f64,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub available_models: Vec<TfliteModelEntry>,
    pub recommended_version: String,
    pub input_size: String,
    pub class_names: Vec<String>,
    pub description: String,
}

/// Metadata about the available TFLite models, so the mobile app can
/// decide whether to download or update its local model.
pub async fn model_info(State(state): State<AppState>) -> AppResult<Json<ModelInfoResponse>> {
    let tflite_dir = PathBuf::from(&state.config.model.tflite_dir);
    let available_models = collect_model_entries(&tflite_dir).await;

    Ok(Json(ModelInfoResponse {
        available_models,
        recommended_version: "2".to_string(),
        input_size: "256x256".to_string(),
        class_names: vec![
            "Early Blight".to_string(),
            "Late Blight".to_string(),
            "Healthy".to_string(),
        ],
        description: "Download a TFLite model for offline potato disease classification \
                      on mobile devices."
            .to_string(),
    }))
}

/// Version names of the .tflite files present in the model directory.
async fn list_available_versions(tflite_dir: &Path) -> Vec<String> {
    collect_model_entries(tflite_dir)
        .await
        .into_iter()
        .map(|entry| entry.version)
        .collect()
}

/// One entry per .tflite file in the model directory, sorted by version.
async fn collect_model_entries(tflite_dir: &Path) -> Vec<TfliteModelEntry> {
    let mut models = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(tflite_dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(stem) = name.strip_suffix(".tflite").map(str::to_string) else {
                continue;
            };
            let size_bytes = match entry.metadata().await {
                Ok(metadata) => metadata.len(),
                Err(_) => continue,
            };
            models.push(TfliteModelEntry {
                version: stem.clone(),
                filename: name,
                size_bytes,
                size_kb: (size_bytes as f64 / 1024.0 * 10.0).round() / 10.0,
                download_url: format!("/api/v1/model/download?version={}", stem),
            });
        }
    }
    models.sort_by(|a, b| a.version.cmp(&b.version));
    models
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("leaflens-model-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn lists_tflite_files_with_sizes_and_urls() {
        let dir = scratch_dir("list");
        fs::write(dir.join("1.tflite"), vec![0u8; 2048]).unwrap();
        fs::write(dir.join("2.tflite"), vec![0u8; 512]).unwrap();
        fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let entries = collect_model_entries(&dir).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].version, "1");
        assert_eq!(entries[0].size_bytes, 2048);
        assert_eq!(entries[0].size_kb, 2.0);
        assert_eq!(entries[0].download_url, "/api/v1/model/download?version=1");
        assert_eq!(entries[1].filename, "2.tflite");
        assert_eq!(entries[1].size_kb, 0.5);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn missing_directory_yields_no_models() {
        let dir = std::env::temp_dir().join("leaflens-model-absent");
        assert!(collect_model_entries(&dir).await.is_empty());
        assert!(list_available_versions(&dir).await.is_empty());
    }

    #[tokio::test]
    async fn version_listing_matches_entry_versions() {
        let dir = scratch_dir("versions");
        fs::write(dir.join("2.tflite"), vec![0u8; 16]).unwrap();
        fs::write(dir.join("3.tflite"), vec![0u8; 16]).unwrap();

        assert_eq!(list_available_versions(&dir).await, vec!["2", "3"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
