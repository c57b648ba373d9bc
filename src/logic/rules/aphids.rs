use super::RiskRule;
use crate::models::{DiseaseRisk, RiskLevel, WeatherObservation};

/// Aphid buildup pressure. Cool, humid spells support colony growth; the
/// colder it gets below 15°C the stronger the signal.
pub struct AphidsRule;

impl RiskRule for AphidsRule {
    fn id(&self) -> &'static str {
        "aphids"
    }

    fn disease(&self) -> &'static str {
        "Aphids"
    }

    fn evaluate(&self, weather: &WeatherObservation) -> DiseaseRisk {
        let t = weather.temperature;
        let h = weather.humidity;

        let (risk_level, reason, suggestion) = if h > 60.0 && t < 20.0 {
            let level = if t < 15.0 {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            (
                level,
                format!(
                    "Cool (<20°C) and humid (>60%) conditions support aphid buildup. T={:.1}°C, H={:.0}%.",
                    t, h
                ),
                "Check undersides of leaves; use neem oil or selective insecticide if needed."
                    .to_string(),
            )
        } else if h > 50.0 && t < 22.0 {
            (
                RiskLevel::Medium,
                format!(
                    "Mild temps and moderate humidity can support aphids. T={:.1}°C, H={:.0}%.",
                    t, h
                ),
                "Encourage natural enemies; avoid broad-spectrum sprays.".to_string(),
            )
        } else {
            (
                RiskLevel::Low,
                "Conditions less favorable for aphids.".to_string(),
                "Routine monitoring.".to_string(),
            )
        };

        DiseaseRisk {
            disease: self.disease().to_string(),
            risk_level,
            reason,
            suggestion,
        }
    }
}
