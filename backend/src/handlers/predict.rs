//! Scan endpoint: upload a potato leaf image, get a diagnosis
//!
//! Composes the full pipeline: leaf pre-check (short-circuits on reject),
//! disease classification, treatment lookup, and, when GPS coordinates are
//! provided, weather-based risk assessment. Weather enrichment is best
//! effort: a failed fetch degrades to a null `weather` field, it never
//! fails the scan.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use shared::{
    assess_risk, treatment_for, DiseaseClass, RiskAssessment, TreatmentRecord, WeatherSnapshot,
};

use crate::error::{AppError, AppResult};
use crate::services::validate_leaf_image;
use crate::AppState;

const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];

/// Treatment fields exposed in the scan response. The weather context is
/// internal to the risk assessment and is not repeated here.
#[derive(Debug, Serialize)]
pub struct TreatmentInfo {
    pub disease: DiseaseClass,
    pub scientific_name: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub severity: String,
}

impl From<&TreatmentRecord> for TreatmentInfo {
    fn from(record: &TreatmentRecord) -> Self {
        TreatmentInfo {
            disease: record.disease,
            scientific_name: record.scientific_name.clone(),
            symptoms: record.symptoms.clone(),
            causes: record.causes.clone(),
            treatment: record.treatment.clone(),
            prevention: record.prevention.clone(),
            severity: record.severity.clone(),
        }
    }
}

/// Scan response returned for both accepted and rejected uploads
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub disease_class: String,
    pub confidence: f64,
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    pub treatment_info: Option<TreatmentInfo>,
    pub weather: Option<WeatherSnapshot>,
    pub weather_risk: Option<RiskAssessment>,
}

/// Parsed multipart upload
struct PredictRequest {
    image_bytes: Vec<u8>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Upload a potato leaf image and get a disease prediction, treatment
/// recommendations, and (with GPS coordinates) a weather risk assessment.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<PredictResponse>> {
    let request = parse_multipart(multipart).await?;

    // Is this actually a leaf? Reject before spending an inference on it.
    let validation = validate_leaf_image(&request.image_bytes);
    if !validation.is_leaf {
        return Ok(Json(PredictResponse {
            disease_class: "Not a Leaf".to_string(),
            confidence: 0.0,
            is_leaf: false,
            validation_message: Some(validation.reason),
            treatment_info: None,
            weather: None,
            weather_risk: None,
        }));
    }

    // Inference is CPU-bound; keep it off the async worker threads
    let classifier = state.classifier.clone();
    let image_bytes = request.image_bytes;
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&image_bytes))
        .await
        .map_err(|e| AppError::Internal(format!("inference task failed: {}", e)))??;

    let treatment = treatment_for(prediction.label);

    let (weather, weather_risk) =
        resolve_weather(&state, prediction.label, request.latitude, request.longitude).await;

    Ok(Json(PredictResponse {
        disease_class: prediction.label.as_str().to_string(),
        confidence: prediction.confidence,
        is_leaf: true,
        validation_message: None,
        treatment_info: Some(treatment.into()),
        weather,
        weather_risk,
    }))
}

/// Extract the image and optional coordinates from the multipart body.
async fn parse_multipart(mut multipart: Multipart) -> AppResult<PredictRequest> {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
                    return Err(AppError::UnsupportedMediaType(format!(
                        "Invalid file type: {}. Allowed: {}",
                        content_type,
                        ALLOWED_CONTENT_TYPES.join(", ")
                    )));
                }
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::ValidationError(format!("Failed to read image field: {}", e))
                })?;
                image_bytes = Some(bytes.to_vec());
            }
            Some("latitude") => {
                latitude = parse_coordinate(field.text().await.ok(), "latitude");
            }
            Some("longitude") => {
                longitude = parse_coordinate(field.text().await.ok(), "longitude");
            }
            _ => {}
        }
    }

    let image_bytes = image_bytes.ok_or_else(|| {
        AppError::ValidationError(
            "No image file provided. Send a 'file' field with your image.".to_string(),
        )
    })?;

    Ok(PredictRequest {
        image_bytes,
        latitude,
        longitude,
    })
}

/// Invalid coordinates are dropped with a warning; the scan proceeds
/// without weather enrichment.
fn parse_coordinate(text: Option<String>, name: &str) -> Option<f64> {
    let text = text?;
    match text.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid GPS coordinate {}: {:?}", name, text);
            None
        }
    }
}

/// Fetch weather and compute the risk assessment when possible.
async fn resolve_weather(
    state: &AppState,
    label: DiseaseClass,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> (Option<WeatherSnapshot>, Option<RiskAssessment>) {
    let (Some(lat), Some(lon)) = (latitude, longitude) else {
        return (None, None);
    };
    let Some(client) = &state.weather else {
        tracing::warn!("Weather API key not configured; skipping risk assessment");
        return (None, None);
    };

    match client.get_current_weather(lat, lon).await {
        Ok(snapshot) => {
            let risk = assess_risk(label, snapshot.temperature, snapshot.humidity);
            (Some(snapshot), Some(risk))
        }
        Err(e) => {
            tracing::warn!("Weather fetch failed for ({}, {}): {}", lat, lon, e);
            (None, None)
        }
    }
}
