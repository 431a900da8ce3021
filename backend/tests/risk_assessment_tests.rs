//! Weather risk assessment tests
//!
//! Exercises the shared risk scoring against the published favorable bands:
//! - Early Blight: 24-29C and >=70% humidity
//! - Late Blight: 10-20C and >=80% humidity

use proptest::prelude::*;
use shared::{assess_risk, assess_risk_for_name, treatment_for_name, DiseaseClass, RiskLevel};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Cool and humid: squarely inside Late Blight's band
    #[test]
    fn test_late_blight_critical_in_band() {
        let risk = assess_risk(DiseaseClass::LateBlight, 15.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Critical);
        assert!(risk.weather_favorable);
        assert!(risk.risk_message.contains("Late Blight"));
    }

    /// Humidity favorable, temperature not: moderate, never favorable
    #[test]
    fn test_late_blight_moderate_outside_temp_band() {
        let risk = assess_risk(DiseaseClass::LateBlight, 25.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Moderate);
        assert!(!risk.weather_favorable);
    }

    /// Healthy scan under Early Blight conditions warns the farmer
    #[test]
    fn test_healthy_scan_warns_under_early_blight_weather() {
        let risk = assess_risk(DiseaseClass::Healthy, 26.0, 75.0);
        assert_eq!(risk.risk_level, RiskLevel::Moderate);
        assert!(risk.weather_favorable);
        assert!(risk.risk_message.contains("Early Blight"));
    }

    /// Healthy scan in hostile weather stays low risk
    #[test]
    fn test_healthy_scan_low_risk_in_cold_dry_weather() {
        let risk = assess_risk(DiseaseClass::Healthy, 2.0, 20.0);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert!(!risk.weather_favorable);
    }

    /// Unknown disease names degrade rather than fail
    #[test]
    fn test_unknown_name_degrades() {
        let risk = assess_risk_for_name("Powdery Mildew", 15.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Unknown);
        assert!(!risk.weather_favorable);

        let record = treatment_for_name("Powdery Mildew");
        assert_eq!(record.disease, DiseaseClass::Healthy);
    }

    /// Band edges are inclusive
    #[test]
    fn test_band_edges_inclusive() {
        assert_eq!(
            assess_risk(DiseaseClass::EarlyBlight, 24.0, 70.0).risk_level,
            RiskLevel::Critical
        );
        assert_eq!(
            assess_risk(DiseaseClass::EarlyBlight, 29.0, 70.0).risk_level,
            RiskLevel::Critical
        );
        // Just past the upper edge only humidity is met
        assert_eq!(
            assess_risk(DiseaseClass::EarlyBlight, 29.1, 70.0).risk_level,
            RiskLevel::Moderate
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Favorable means the conjunction: Critical and weather_favorable rise
    /// and fall together for a disease scan.
    #[test]
    fn prop_favorable_iff_critical(temp in -20.0f64..50.0, humidity in 0.0f64..100.0) {
        for class in [DiseaseClass::EarlyBlight, DiseaseClass::LateBlight] {
            let risk = assess_risk(class, temp, humidity);
            prop_assert_eq!(
                risk.weather_favorable,
                risk.risk_level == RiskLevel::Critical
            );
        }
    }

    /// Risk levels follow the documented two-signal branching for
    /// Late Blight (10-20C, >=80%).
    #[test]
    fn prop_late_blight_levels(temp in -20.0f64..50.0, humidity in 0.0f64..100.0) {
        let temp_favorable = (10.0..=20.0).contains(&temp);
        let humidity_favorable = humidity >= 80.0;

        let expected = match (temp_favorable, humidity_favorable) {
            (true, true) => RiskLevel::Critical,
            (true, false) => RiskLevel::High,
            (false, true) => RiskLevel::Moderate,
            (false, false) => RiskLevel::Low,
        };

        let risk = assess_risk(DiseaseClass::LateBlight, temp, humidity);
        prop_assert_eq!(risk.risk_level, expected);
    }

    /// A Healthy scan is Moderate exactly when some disease band is met,
    /// and that is the only case reported as favorable.
    #[test]
    fn prop_healthy_moderate_iff_any_band_met(temp in -20.0f64..50.0, humidity in 0.0f64..100.0) {
        let early = (24.0..=29.0).contains(&temp) && humidity >= 70.0;
        let late = (10.0..=20.0).contains(&temp) && humidity >= 80.0;
        let any = early || late;

        let risk = assess_risk(DiseaseClass::Healthy, temp, humidity);
        prop_assert_eq!(risk.weather_favorable, any);
        prop_assert_eq!(
            risk.risk_level,
            if any { RiskLevel::Moderate } else { RiskLevel::Low }
        );
    }

    /// Pure function: identical inputs give identical outputs.
    #[test]
    fn prop_assessment_idempotent(temp in -20.0f64..50.0, humidity in 0.0f64..100.0) {
        for class in DiseaseClass::ALL {
            let a = assess_risk(class, temp, humidity);
            let b = assess_risk(class, temp, humidity);
            prop_assert_eq!(a, b);
        }
    }

    /// The risk message always names the scanned disease for disease scans.
    #[test]
    fn prop_message_names_disease(temp in -20.0f64..50.0, humidity in 0.0f64..100.0) {
        for class in [DiseaseClass::EarlyBlight, DiseaseClass::LateBlight] {
            let risk = assess_risk(class, temp, humidity);
            prop_assert!(risk.risk_message.contains(class.as_str()));
        }
    }
}
