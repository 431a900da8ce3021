//! Weather-based disease risk assessment
//!
//! Pure, deterministic scoring of how favorable the current weather is for
//! a given disease. "Favorable" means the conjunction of the temperature
//! band and the humidity floor; a single met condition raises the risk
//! level but never sets `weather_favorable`.

use crate::models::RiskAssessment;
use crate::treatment::treatment_for;
use crate::types::{DiseaseClass, RiskLevel};

/// Assess disease risk for current weather conditions.
///
/// For a Healthy scan, both disease contexts are evaluated independently:
/// the result warns about every disease whose conditions are currently met.
pub fn assess_risk(class: DiseaseClass, temperature: f64, humidity: f64) -> RiskAssessment {
    if class == DiseaseClass::Healthy {
        let early = check_weather_risk(DiseaseClass::EarlyBlight, temperature, humidity);
        let late = check_weather_risk(DiseaseClass::LateBlight, temperature, humidity);

        let mut warnings = Vec::new();
        if early.weather_favorable {
            warnings
                .push("Current weather is favorable for Early Blight. Monitor closely.".to_string());
        }
        if late.weather_favorable {
            warnings.push(
                "Current weather is favorable for Late Blight. Consider preventive sprays."
                    .to_string(),
            );
        }

        let weather_favorable = !warnings.is_empty();
        return RiskAssessment {
            risk_level: if weather_favorable {
                RiskLevel::Moderate
            } else {
                RiskLevel::Low
            },
            risk_message: if weather_favorable {
                warnings.join(" | ")
            } else {
                "Weather conditions are not favorable for disease. Keep monitoring!".to_string()
            },
            weather_favorable,
        };
    }

    check_weather_risk(class, temperature, humidity)
}

/// String-level wrapper for collaborators holding a free-form class name.
/// Unrecognized names yield an `Unknown` risk level.
pub fn assess_risk_for_name(name: &str, temperature: f64, humidity: f64) -> RiskAssessment {
    match DiseaseClass::parse(name) {
        Some(class) => assess_risk(class, temperature, humidity),
        None => RiskAssessment {
            risk_level: RiskLevel::Unknown,
            risk_message: "Unknown disease.".to_string(),
            weather_favorable: false,
        },
    }
}

/// Score one disease's context against the measured conditions.
fn check_weather_risk(class: DiseaseClass, temperature: f64, humidity: f64) -> RiskAssessment {
    let context = &treatment_for(class).weather_context;

    let Some((temp_min, temp_max, humidity_min)) = context.bounds() else {
        return RiskAssessment {
            risk_level: RiskLevel::None,
            risk_message: "No disease risk.".to_string(),
            weather_favorable: false,
        };
    };

    let temp_favorable = temp_min <= temperature && temperature <= temp_max;
    let humidity_favorable = humidity >= humidity_min;
    let both_favorable = temp_favorable && humidity_favorable;

    let (risk_level, risk_message) = if both_favorable {
        (
            RiskLevel::Critical,
            format!(
                "CRITICAL: Current temperature ({temperature}C) and humidity ({humidity}%) are \
                 HIGHLY favorable for {class}. {} Take immediate preventive/treatment action!",
                context.description
            ),
        )
    } else if temp_favorable {
        (
            RiskLevel::High,
            format!(
                "HIGH RISK: Temperature ({temperature}C) is in the favorable range for {class} \
                 ({temp_min}-{temp_max}C). Monitor humidity closely."
            ),
        )
    } else if humidity_favorable {
        (
            RiskLevel::Moderate,
            format!(
                "MODERATE RISK: Humidity ({humidity}%) is favorable for {class} \
                 (>{humidity_min}%). Monitor temperature closely."
            ),
        )
    } else {
        (
            RiskLevel::Low,
            format!(
                "Current weather (Temp: {temperature}C, Humidity: {humidity}%) is NOT favorable \
                 for {class}. Continue monitoring."
            ),
        )
    };

    RiskAssessment {
        risk_level,
        risk_message,
        weather_favorable: both_favorable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_blight_critical_when_cool_and_humid() {
        let risk = assess_risk(DiseaseClass::LateBlight, 15.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Critical);
        assert!(risk.weather_favorable);
    }

    #[test]
    fn late_blight_moderate_when_only_humidity_matches() {
        let risk = assess_risk(DiseaseClass::LateBlight, 25.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Moderate);
        assert!(!risk.weather_favorable);
    }

    #[test]
    fn late_blight_high_when_only_temperature_matches() {
        let risk = assess_risk(DiseaseClass::LateBlight, 15.0, 60.0);
        assert_eq!(risk.risk_level, RiskLevel::High);
        assert!(!risk.weather_favorable);
    }

    #[test]
    fn late_blight_low_when_neither_matches() {
        let risk = assess_risk(DiseaseClass::LateBlight, 30.0, 40.0);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert!(!risk.weather_favorable);
    }

    #[test]
    fn temperature_band_is_inclusive_at_both_ends() {
        for temp in [10.0, 20.0] {
            let risk = assess_risk(DiseaseClass::LateBlight, temp, 80.0);
            assert_eq!(risk.risk_level, RiskLevel::Critical);
        }
    }

    #[test]
    fn healthy_warns_when_early_blight_band_is_met() {
        // 26C / 75% sits inside Early Blight's 24-29C / >=70% band.
        let risk = assess_risk(DiseaseClass::Healthy, 26.0, 75.0);
        assert_eq!(risk.risk_level, RiskLevel::Moderate);
        assert!(risk.weather_favorable);
        assert!(risk.risk_message.contains("Early Blight"));
    }

    #[test]
    fn healthy_low_when_no_disease_band_is_met() {
        let risk = assess_risk(DiseaseClass::Healthy, 5.0, 30.0);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert!(!risk.weather_favorable);
    }

    #[test]
    fn healthy_warning_names_only_the_matching_disease() {
        // High humidity plus a temperature in Late Blight's band warns about
        // Late Blight alone; the bands do not overlap in temperature.
        let risk = assess_risk(DiseaseClass::Healthy, 18.0, 90.0);
        assert!(risk.weather_favorable);
        assert!(risk.risk_message.contains("Late Blight"));
        assert!(!risk.risk_message.contains("Early Blight"));
    }

    #[test]
    fn unknown_name_yields_unknown_level() {
        let risk = assess_risk_for_name("Rust Fungus", 15.0, 85.0);
        assert_eq!(risk.risk_level, RiskLevel::Unknown);
        assert!(!risk.weather_favorable);
    }

    #[test]
    fn assessment_is_deterministic() {
        let a = assess_risk(DiseaseClass::EarlyBlight, 26.5, 71.2);
        let b = assess_risk(DiseaseClass::EarlyBlight, 26.5, 71.2);
        assert_eq!(a, b);
    }
}
