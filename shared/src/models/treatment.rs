//! Treatment recommendation models

use serde::{Deserialize, Serialize};

use crate::types::DiseaseClass;

/// Weather conditions under which a disease thrives.
///
/// Bounds are absent for the Healthy record, which has no favorable band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_min: Option<f64>,
    pub description: String,
}

impl WeatherContext {
    /// Favorable band as (temp_min, temp_max, humidity_min), if defined.
    pub fn bounds(&self) -> Option<(f64, f64, f64)> {
        match (self.temp_min, self.temp_max, self.humidity_min) {
            (Some(t_min), Some(t_max), Some(h_min)) => Some((t_min, t_max, h_min)),
            _ => None,
        }
    }
}

/// Static treatment reference record for one disease class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentRecord {
    pub disease: DiseaseClass,
    pub scientific_name: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub severity: String,
    pub weather_context: WeatherContext,
}
