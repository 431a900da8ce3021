//! Static treatment recommendation database
//!
//! Detailed treatment advice, symptoms, prevention tips and contextual
//! weather information for each potato disease class. The table is built
//! once per process and is read-only afterwards; lookup is total over the
//! three known classes.

use std::sync::OnceLock;

use crate::models::{TreatmentRecord, WeatherContext};
use crate::types::DiseaseClass;

static TREATMENT_DATABASE: OnceLock<[TreatmentRecord; 3]> = OnceLock::new();

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Records indexed by [`DiseaseClass::index`].
fn database() -> &'static [TreatmentRecord; 3] {
    TREATMENT_DATABASE.get_or_init(|| {
        [
            TreatmentRecord {
                disease: DiseaseClass::EarlyBlight,
                scientific_name: "Alternaria solani".to_string(),
                symptoms: strings(&[
                    "Dark brown to black concentric rings (target-like spots) on older, lower leaves",
                    "Yellowing of tissue surrounding the lesions",
                    "Lesions may also appear on stems and tubers",
                    "Premature defoliation in severe cases",
                ]),
                causes: strings(&[
                    "Fungal pathogen Alternaria solani",
                    "Thrives in warm (24-29C / 75-84F), humid conditions",
                    "Spreads through wind, rain splash, and infected plant debris",
                    "Overwinters in soil and plant residues",
                ]),
                treatment: strings(&[
                    "Apply chlorothalonil-based fungicides (e.g., Bravo, Daconil) at first sign of symptoms",
                    "Use mancozeb or copper-based fungicides as preventive sprays",
                    "Remove and destroy infected leaves immediately",
                    "Apply neem oil as an organic alternative for mild infections",
                    "Ensure proper spacing between plants for air circulation",
                ]),
                prevention: strings(&[
                    "Practice crop rotation, avoid planting potatoes in the same field for 2-3 years",
                    "Use certified disease-free seed potatoes",
                    "Apply mulch to prevent soil-borne spores from splashing onto leaves",
                    "Water at the base of plants (drip irrigation) to keep foliage dry",
                    "Remove plant debris after harvest to reduce overwintering spores",
                    "Choose resistant varieties when available (e.g., Kennebec, Elba)",
                ]),
                severity: "Moderate".to_string(),
                weather_context: WeatherContext {
                    temp_min: Some(24.0),
                    temp_max: Some(29.0),
                    humidity_min: Some(70.0),
                    description: "Early Blight thrives in warm (24-29C) and humid (>70%) \
                                  conditions. Alternating wet and dry weather accelerates \
                                  spore production."
                        .to_string(),
                },
            },
            TreatmentRecord {
                disease: DiseaseClass::LateBlight,
                scientific_name: "Phytophthora infestans".to_string(),
                symptoms: strings(&[
                    "Water-soaked, dark green to brown lesions on leaves",
                    "White fuzzy mold growth on the underside of leaves in humid conditions",
                    "Rapid wilting and browning of entire plants within days",
                    "Brown, firm rot on tubers with a granular texture beneath the skin",
                    "Foul smell from severely infected plants",
                ]),
                causes: strings(&[
                    "Oomycete pathogen Phytophthora infestans",
                    "Thrives in cool (10-20C / 50-68F), wet, and humid conditions",
                    "Spreads rapidly through wind-borne spores and rain",
                    "Can devastate an entire field within 1-2 weeks if untreated",
                    "Historically caused the Irish Potato Famine (1845-1852)",
                ]),
                treatment: strings(&[
                    "Apply metalaxyl (Ridomil) or cymoxanil-based systemic fungicides IMMEDIATELY",
                    "Copper-based fungicides (Bordeaux mixture) as a contact spray",
                    "Remove and BURN infected plants, do NOT compost them",
                    "Harvest tubers early if infection is spreading uncontrollably",
                    "Avoid overhead irrigation during outbreaks",
                ]),
                prevention: strings(&[
                    "Use certified disease-free, resistant seed potatoes (e.g., Sarpo Mira, Defender)",
                    "Apply preventive fungicide sprays before conditions become favorable",
                    "Monitor weather forecasts, apply protection before cool, rainy periods",
                    "Ensure excellent drainage in fields to prevent waterlogging",
                    "Hill up potatoes properly to protect tubers from spore wash-down",
                    "Destroy volunteer potato plants and cull piles in spring",
                ]),
                severity: "Severe - Requires IMMEDIATE action".to_string(),
                weather_context: WeatherContext {
                    temp_min: Some(10.0),
                    temp_max: Some(20.0),
                    humidity_min: Some(80.0),
                    description: "Late Blight is most dangerous in cool (10-20C), highly humid \
                                  (>80%) conditions with prolonged leaf wetness. Rainy, overcast \
                                  days are critical risk periods."
                        .to_string(),
                },
            },
            TreatmentRecord {
                disease: DiseaseClass::Healthy,
                scientific_name: "N/A".to_string(),
                symptoms: strings(&[
                    "No visible disease symptoms",
                    "Uniform green foliage with no spots or discoloration",
                    "Strong stem and leaf structure",
                ]),
                causes: Vec::new(),
                treatment: strings(&["No treatment required, your plant looks healthy!"]),
                prevention: strings(&[
                    "Continue regular monitoring of your crop",
                    "Maintain proper irrigation and fertilization schedules",
                    "Apply preventive fungicide sprays during favorable disease conditions",
                    "Practice crop rotation to maintain soil health",
                    "Scout fields regularly, especially during wet weather",
                ]),
                severity: "None".to_string(),
                weather_context: WeatherContext {
                    temp_min: None,
                    temp_max: None,
                    humidity_min: None,
                    description: "Your plant is healthy! Keep monitoring weather conditions and \
                                  apply preventive measures during cool, humid periods."
                        .to_string(),
                },
            },
        ]
    })
}

/// Full treatment recommendation for a disease class.
///
/// Total function: every class has exactly one record.
pub fn treatment_for(class: DiseaseClass) -> &'static TreatmentRecord {
    &database()[class.index()]
}

/// String-level lookup used by collaborators that hold a free-form class
/// name. Unknown names degrade to the Healthy record; callers wanting
/// strict behavior parse with [`DiseaseClass::parse`] first.
pub fn treatment_for_name(name: &str) -> &'static TreatmentRecord {
    match DiseaseClass::parse(name) {
        Some(class) => treatment_for(class),
        None => treatment_for(DiseaseClass::Healthy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_and_consistent() {
        for class in DiseaseClass::ALL {
            let record = treatment_for(class);
            assert_eq!(record.disease, class);
            assert!(!record.treatment.is_empty());
            assert!(!record.prevention.is_empty());
        }
    }

    #[test]
    fn disease_records_carry_weather_bounds() {
        let early = treatment_for(DiseaseClass::EarlyBlight);
        assert_eq!(early.weather_context.bounds(), Some((24.0, 29.0, 70.0)));

        let late = treatment_for(DiseaseClass::LateBlight);
        assert_eq!(late.weather_context.bounds(), Some((10.0, 20.0, 80.0)));
    }

    #[test]
    fn healthy_record_has_no_weather_bounds() {
        let healthy = treatment_for(DiseaseClass::Healthy);
        assert_eq!(healthy.weather_context.bounds(), None);
        assert!(healthy.causes.is_empty());
    }

    #[test]
    fn unknown_name_falls_back_to_healthy() {
        let fallback = treatment_for_name("Unknown");
        assert_eq!(fallback, treatment_for(DiseaseClass::Healthy));
    }

    #[test]
    fn known_names_resolve_to_their_record() {
        assert_eq!(
            treatment_for_name("Late Blight").disease,
            DiseaseClass::LateBlight
        );
        assert_eq!(
            treatment_for_name("Early Blight").disease,
            DiseaseClass::EarlyBlight
        );
    }
}
