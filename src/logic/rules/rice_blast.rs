use super::RiskRule;
use crate::models::{DiseaseRisk, RiskLevel, WeatherObservation};

/// Rice blast pressure driven by recent rainfall and warm temperatures.
pub struct RiceBlastRule;

impl RiskRule for RiceBlastRule {
    fn id(&self) -> &'static str {
        "rice_blast"
    }

    fn disease(&self) -> &'static str {
        "Rice Blast"
    }

    fn evaluate(&self, weather: &WeatherObservation) -> DiseaseRisk {
        let t = weather.temperature;
        let r = weather.rainfall_last_24h;

        let (risk_level, reason, suggestion) = if r > 20.0 && t > 25.0 && t < 30.0 {
            (
                RiskLevel::High,
                format!(
                    "Heavy rain {:.1} mm and warm temps {:.1}°C favor blast.",
                    r, t
                ),
                "Ensure balanced nitrogen; consider prophylactic fungicide in hotspots."
                    .to_string(),
            )
        } else if r > 5.0 && t > 22.0 && t < 32.0 {
            (
                RiskLevel::Medium,
                format!(
                    "Recent rain {:.1} mm with suitable temps may support blast infection.",
                    r
                ),
                "Improve drainage and monitor for lesions on leaves and nodes.".to_string(),
            )
        } else {
            (
                RiskLevel::Low,
                "Insufficient moisture/temperature alignment for blast.".to_string(),
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
