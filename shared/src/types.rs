//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Potato leaf disease classes recognized by the classifier.
///
/// The variant order is a contract with the trained model's output layer:
/// index 0 = Early Blight, 1 = Late Blight, 2 = Healthy. It must never be
/// reordered independently of retraining.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DiseaseClass {
    #[serde(rename = "Early Blight")]
    EarlyBlight,
    #[serde(rename = "Late Blight")]
    LateBlight,
    Healthy,
}

impl DiseaseClass {
    /// All classes in model output order.
    pub const ALL: [DiseaseClass; 3] = [
        DiseaseClass::EarlyBlight,
        DiseaseClass::LateBlight,
        DiseaseClass::Healthy,
    ];

    /// Map a model output index to a class.
    pub fn from_index(index: usize) -> Option<DiseaseClass> {
        Self::ALL.get(index).copied()
    }

    /// Position of this class in the model output vector.
    pub fn index(&self) -> usize {
        match self {
            DiseaseClass::EarlyBlight => 0,
            DiseaseClass::LateBlight => 1,
            DiseaseClass::Healthy => 2,
        }
    }

    /// Human-readable class name as used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseClass::EarlyBlight => "Early Blight",
            DiseaseClass::LateBlight => "Late Blight",
            DiseaseClass::Healthy => "Healthy",
        }
    }

    /// Parse a class name. Returns `None` for unrecognized names; callers
    /// that want the lenient historical behavior use
    /// [`crate::treatment::treatment_for_name`].
    pub fn parse(name: &str) -> Option<DiseaseClass> {
        match name {
            "Early Blight" => Some(DiseaseClass::EarlyBlight),
            "Late Blight" => Some(DiseaseClass::LateBlight),
            "Healthy" => Some(DiseaseClass::Healthy),
            _ => None,
        }
    }
}

impl std::fmt::Display for DiseaseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal disease risk level derived from current weather.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    None,
    Low,
    Moderate,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_round_trip() {
        for class in DiseaseClass::ALL {
            assert_eq!(DiseaseClass::from_index(class.index()), Some(class));
        }
        assert_eq!(DiseaseClass::from_index(3), None);
    }

    #[test]
    fn class_name_round_trip() {
        for class in DiseaseClass::ALL {
            assert_eq!(DiseaseClass::parse(class.as_str()), Some(class));
        }
        assert_eq!(DiseaseClass::parse("Not a Leaf"), None);
    }

    #[test]
    fn class_serializes_as_display_name() {
        let json = serde_json::to_string(&DiseaseClass::EarlyBlight).unwrap();
        assert_eq!(json, "\"Early Blight\"");
    }
}
