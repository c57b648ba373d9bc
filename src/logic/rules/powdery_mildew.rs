use super::RiskRule;
use crate::models::{DiseaseRisk, RiskLevel, WeatherObservation};

/// Powdery mildew pressure on wheat.
///
/// High when the canopy is both humid (>70%) and warm (20-30°C); a wider
/// warm-and-humid band still warrants monitoring.
pub struct PowderyMildewRule;

impl RiskRule for PowderyMildewRule {
    fn id(&self) -> &'static str {
        "powdery_mildew"
    }

    fn disease(&self) -> &'static str {
        "Powdery Mildew (wheat)"
    }

    fn evaluate(&self, weather: &WeatherObservation) -> DiseaseRisk {
        let t = weather.temperature;
        let h = weather.humidity;

        let (risk_level, reason, suggestion) = if h > 70.0 && t > 20.0 && t < 30.0 {
            (
                RiskLevel::High,
                format!("Humidity {:.0}% and temperature {:.1}°C favor mildew.", h, t),
                "Scout fields, apply sulfur or triazole fungicide if symptoms appear.".to_string(),
            )
        } else if h > 60.0 && t > 18.0 && t < 32.0 {
            (
                RiskLevel::Medium,
                format!(
                    "Warm and humid conditions may favor mildew (H {:.0}%, T {:.1}°C).",
                    h, t
                ),
                "Monitor crop canopy; improve airflow and avoid excess nitrogen.".to_string(),
            )
        } else {
            (
                RiskLevel::Low,
                "Conditions less favorable for mildew.".to_string(),
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
