//! Disease classifier adapter
//!
//! Wraps the pretrained potato-disease ONNX model: preprocesses uploaded
//! bytes into the model's input tensor, runs inference, and maps the output
//! vector to a disease class and confidence.
//!
//! The model is loaded once at process startup and shared read-only through
//! `AppState` for the lifetime of the process; loading is expensive relative
//! to inference and the plan is stateless after load.

use std::path::Path;

use image::imageops::FilterType;
use shared::{DiseaseClass, PredictionResult};
use tract_onnx::prelude::*;

use crate::error::{AppError, AppResult};

/// Model input resolution, fixed by the trained network
pub const IMAGE_SIZE: u32 = 256;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Loaded classifier model
pub struct Classifier {
    plan: OnnxPlan,
}

impl Classifier {
    /// Load and optimize the ONNX model from disk.
    ///
    /// Fails fatally when the model file is missing or malformed; the
    /// server cannot serve scans without it.
    pub fn load(path: &Path) -> AppResult<Self> {
        tracing::info!("Loading ML model from: {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| AppError::Model(format!("failed to read model: {}", e)))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(1, IMAGE_SIZE as usize, IMAGE_SIZE as usize, 3),
                ),
            )
            .map_err(|e| AppError::Model(format!("failed to set input shape: {}", e)))?
            .into_optimized()
            .map_err(|e| AppError::Model(format!("failed to optimize model: {}", e)))?
            .into_runnable()
            .map_err(|e| AppError::Model(format!("failed to build plan: {}", e)))?;

        tracing::info!("ML model loaded successfully");
        Ok(Self { plan })
    }

    /// Run inference on an image and return the prediction.
    ///
    /// Errors on decode or inference failure; both are fatal for the
    /// request and are surfaced to the caller unretried.
    pub fn predict(&self, image_bytes: &[u8]) -> AppResult<PredictionResult> {
        let pixels = preprocess_image(image_bytes)?;

        let input = tract_ndarray::Array4::from_shape_vec(
            (1, IMAGE_SIZE as usize, IMAGE_SIZE as usize, 3),
            pixels,
        )
        .map_err(|e| AppError::Inference(format!("bad input shape: {}", e)))?;

        let outputs = self
            .plan
            .run(tvec!(input.into_tensor().into()))
            .map_err(|e| AppError::Inference(e.to_string()))?;

        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| AppError::Inference(format!("unexpected output tensor: {}", e)))?;

        map_output(scores.iter().copied().collect::<Vec<f32>>().as_slice())
    }
}

/// Decode, resize to the model resolution and normalize to [0, 1].
///
/// Returns pixels in NHWC order (row-major RGB), matching the trained
/// model's input layout. The saved model does not include a rescaling
/// layer, so normalization happens here.
fn preprocess_image(image_bytes: &[u8]) -> AppResult<Vec<f32>> {
    let image = image::load_from_memory(image_bytes)
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;

    let rgb = image
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    Ok(rgb.as_raw().iter().map(|&v| v as f32 / 255.0).collect())
}

/// Map the model output vector to a prediction.
fn map_output(scores: &[f32]) -> AppResult<PredictionResult> {
    let (class_index, &best) = scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or_else(|| AppError::Inference("empty output vector".to_string()))?;

    let label = DiseaseClass::from_index(class_index).ok_or_else(|| {
        AppError::Inference(format!(
            "output index {} outside known classes",
            class_index
        ))
    })?;

    Ok(PredictionResult {
        label,
        confidence: round2(best as f64 * 100.0),
        class_index,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn sample_image_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(32, 32, Rgb([30, 160, 40]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn preprocess_produces_normalized_nhwc_batch() {
        let pixels = preprocess_image(&sample_image_bytes()).unwrap();
        assert_eq!(pixels.len(), (IMAGE_SIZE * IMAGE_SIZE * 3) as usize);
        assert!(pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn preprocess_rejects_undecodable_bytes() {
        let err = preprocess_image(b"not an image").unwrap_err();
        assert!(matches!(err, AppError::ImageDecode(_)));
    }

    #[test]
    fn output_mapping_picks_argmax() {
        let prediction = map_output(&[0.05, 0.92, 0.03]).unwrap();
        assert_eq!(prediction.label, DiseaseClass::LateBlight);
        assert_eq!(prediction.class_index, 1);
        assert_eq!(prediction.confidence, 92.0);
    }

    #[test]
    fn output_mapping_rounds_confidence() {
        let prediction = map_output(&[0.12345, 0.6789, 0.2]).unwrap();
        assert_eq!(prediction.confidence, 67.89);
        assert!((0.0..=100.0).contains(&prediction.confidence));
    }

    #[test]
    fn label_matches_class_index_for_every_slot() {
        for index in 0..3 {
            let mut scores = [0.1f32; 3];
            scores[index] = 0.8;
            let prediction = map_output(&scores).unwrap();
            assert_eq!(prediction.class_index, index);
            assert_eq!(
                prediction.label,
                DiseaseClass::from_index(index).unwrap()
            );
        }
    }

    #[test]
    fn output_wider_than_class_list_is_an_error() {
        let err = map_output(&[0.1, 0.1, 0.1, 0.7]).unwrap_err();
        assert!(matches!(err, AppError::Inference(_)));
    }
}
