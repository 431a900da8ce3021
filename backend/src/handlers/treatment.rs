//! Treatment detail endpoint

use axum::extract::Path;
use axum::Json;
use shared::{treatment_for, DiseaseClass, TreatmentRecord};

use crate::error::{AppError, AppResult};

/// Get full treatment details for a specific disease.
///
/// Unlike the scan pipeline, this endpoint is strict: an unknown disease
/// name is a 404, not a silent fallback to the Healthy record.
pub async fn get_treatment_detail(
    Path(disease_name): Path<String>,
) -> AppResult<Json<TreatmentRecord>> {
    let class = DiseaseClass::parse(&disease_name).ok_or_else(|| {
        AppError::NotFound(format!(
            "Disease '{}' (valid options: Early Blight, Late Blight, Healthy)",
            disease_name
        ))
    })?;

    Ok(Json(treatment_for(class).clone()))
}
