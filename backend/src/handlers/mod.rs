//! HTTP handlers for the LeafLens backend

pub mod health;
pub mod model;
pub mod predict;
pub mod treatment;

pub use health::{health_check, ping};
pub use model::{download_tflite_model, model_info};
pub use predict::predict;
pub use treatment::get_treatment_detail;
