//! Scan pipeline result models

use serde::{Deserialize, Serialize};

use crate::types::DiseaseClass;

/// Outcome of the leaf pre-check on an uploaded image.
///
/// Produced once per image, before the classifier runs. When `is_leaf` is
/// false the pipeline short-circuits and the classifier is never invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    /// True if the image appears to be a plant leaf
    pub is_leaf: bool,
    /// How leaf-like the image is, in [0, 1], rounded to 3 decimals
    pub confidence: f64,
    /// Human-readable explanation of the decision
    pub reason: String,
}

/// Outcome of a single classifier inference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Predicted disease class
    #[serde(rename = "class")]
    pub label: DiseaseClass,
    /// Confidence for the predicted class, in [0, 100], rounded to 2 decimals
    pub confidence: f64,
    /// Index of the predicted class in the model output vector
    pub class_index: usize,
}
