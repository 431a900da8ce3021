//! Leaf pre-check for uploaded images
//!
//! Validates whether an image is likely a plant leaf BEFORE the disease
//! classifier runs, preventing nonsensical predictions on non-leaf uploads
//! (selfies, cars). Technique: green-channel dominance analysis over a
//! downscaled copy of the image. This is a tunable, explainable heuristic
//! gate, not a learned model.

use image::imageops::FilterType;
use shared::ValidationResult;

/// Min fraction of green-ish pixels
const GREEN_DOMINANCE_THRESHOLD: f64 = 0.20;
/// Green channel must be at least 5% higher than the average of R and B
const MIN_GREEN_RATIO: f64 = 1.05;
/// Min average saturation, filters out grayscale images
const SATURATION_THRESHOLD: f64 = 0.15;

/// Color-distribution analysis does not need full resolution
const ANALYSIS_SIZE: u32 = 128;

/// Analyze the image to determine if it likely contains a plant leaf.
///
/// Never errors: on any internal failure the check fails open, because a
/// false rejection here would block a legitimate scan.
pub fn validate_leaf_image(image_bytes: &[u8]) -> ValidationResult {
    match analyze(image_bytes) {
        Ok(result) => {
            tracing::info!(
                "Leaf validation: is_leaf={}, score={}",
                result.is_leaf,
                result.confidence
            );
            result
        }
        Err(e) => {
            tracing::error!("Image validation failed: {}", e);
            ValidationResult {
                is_leaf: true,
                confidence: 0.0,
                reason: "Validation skipped due to an error.".to_string(),
            }
        }
    }
}

fn analyze(image_bytes: &[u8]) -> Result<ValidationResult, image::ImageError> {
    let image = image::load_from_memory(image_bytes)?;
    let rgb = image
        .resize_exact(ANALYSIS_SIZE, ANALYSIS_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let pixel_count = (rgb.width() * rgb.height()) as f64;

    let mut green_dominant = 0u64;
    let mut sum_red = 0.0f64;
    let mut sum_green = 0.0f64;
    let mut sum_blue = 0.0f64;
    let mut sum_saturation = 0.0f64;

    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;

        // A pixel is green-ish if green exceeds both red and blue
        if g > r && g > b {
            green_dominant += 1;
        }

        sum_red += r as f64;
        sum_green += g as f64;
        sum_blue += b as f64;

        let max = r.max(g).max(b) as f64;
        let min = r.min(g).min(b) as f64;
        if max > 0.0 {
            sum_saturation += (max - min) / max;
        }
    }

    let green_fraction = green_dominant as f64 / pixel_count;

    // Guard against divide-by-near-zero on near-black images
    let avg_other = (sum_red / pixel_count + sum_blue / pixel_count) / 2.0;
    let green_ratio = (sum_green / pixel_count) / avg_other.max(1.0);

    let avg_saturation = sum_saturation / pixel_count;

    // Weighted combination of the three checks, each capped at 1.0
    let score = 0.50 * (green_fraction / GREEN_DOMINANCE_THRESHOLD).min(1.0)
        + 0.30 * (green_ratio / MIN_GREEN_RATIO).min(1.0)
        + 0.20 * (avg_saturation / SATURATION_THRESHOLD).min(1.0);
    let confidence = round3(score);

    let is_leaf = green_fraction >= GREEN_DOMINANCE_THRESHOLD
        && green_ratio >= MIN_GREEN_RATIO
        && avg_saturation >= SATURATION_THRESHOLD;

    let reason = if is_leaf {
        "Image appears to contain a plant leaf.".to_string()
    } else {
        let mut reasons = Vec::new();
        if green_fraction < GREEN_DOMINANCE_THRESHOLD {
            reasons.push(format!(
                "low green content ({:.1}% green pixels, need >={:.0}%)",
                green_fraction * 100.0,
                GREEN_DOMINANCE_THRESHOLD * 100.0
            ));
        }
        if green_ratio < MIN_GREEN_RATIO {
            reasons.push(format!(
                "green channel not dominant (ratio {:.2}, need >={})",
                green_ratio, MIN_GREEN_RATIO
            ));
        }
        if avg_saturation < SATURATION_THRESHOLD {
            reasons.push(format!(
                "low color saturation ({:.2}, need >={})",
                avg_saturation, SATURATION_THRESHOLD
            ));
        }
        format!(
            "Image does not appear to be a plant leaf: {}",
            reasons.join("; ")
        )
    };

    tracing::debug!(
        "Leaf validation signals: green_frac={:.3}, green_ratio={:.3}, saturation={:.3}",
        green_fraction,
        green_ratio,
        avg_saturation
    );

    Ok(ValidationResult {
        is_leaf,
        confidence,
        reason,
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn uniform_image(r: u8, g: u8, b: u8) -> Vec<u8> {
        let image = RgbImage::from_pixel(64, 64, Rgb([r, g, b]));
        encode_png(&image)
    }

    #[test]
    fn green_image_is_accepted() {
        let result = validate_leaf_image(&uniform_image(40, 180, 50));
        assert!(result.is_leaf);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.reason, "Image appears to contain a plant leaf.");
    }

    #[test]
    fn gray_image_fails_saturation_check() {
        let result = validate_leaf_image(&uniform_image(128, 128, 128));
        assert!(!result.is_leaf);
        assert!(result.reason.contains("low color saturation"));
    }

    #[test]
    fn black_image_is_rejected() {
        let result = validate_leaf_image(&uniform_image(0, 0, 0));
        assert!(!result.is_leaf);
        assert!(result.confidence < 1.0);
    }

    #[test]
    fn red_image_reports_every_failed_check() {
        // Saturated red: fails green dominance and green ratio, passes
        // saturation.
        let result = validate_leaf_image(&uniform_image(220, 30, 30));
        assert!(!result.is_leaf);
        assert!(result.reason.contains("low green content"));
        assert!(result.reason.contains("green channel not dominant"));
        assert!(!result.reason.contains("low color saturation"));
        assert!(result.reason.contains("; "));
    }

    #[test]
    fn undecodable_bytes_fail_open() {
        let result = validate_leaf_image(b"definitely not an image");
        assert!(result.is_leaf);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reason, "Validation skipped due to an error.");
    }

    #[test]
    fn validation_is_deterministic() {
        let bytes = uniform_image(60, 140, 80);
        let first = validate_leaf_image(&bytes);
        let second = validate_leaf_image(&bytes);
        assert_eq!(first, second);
    }

    #[test]
    fn confidence_is_clamped_to_unit_interval() {
        for rgb in [(0, 0, 0), (255, 255, 255), (10, 250, 10), (200, 40, 90)] {
            let result = validate_leaf_image(&uniform_image(rgb.0, rgb.1, rgb.2));
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }
}
