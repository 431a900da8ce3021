//! Weather risk assessment models

use serde::{Deserialize, Serialize};

use crate::types::RiskLevel;

/// Weather-favorability assessment for a disease at a scan location.
///
/// Derived from current weather, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_message: String,
    /// True only when both the temperature band and the humidity floor of
    /// the disease are met. A single met condition raises the risk level
    /// but does not count as favorable.
    pub weather_favorable: bool,
}
