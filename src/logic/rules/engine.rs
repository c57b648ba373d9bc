use super::{
    aphids::AphidsRule, powdery_mildew::PowderyMildewRule, rice_blast::RiceBlastRule, RiskRule,
};
use crate::models::{DiseaseRisk, RiskLevel, WeatherObservation};

pub struct RiskEngine {
    rules: Vec<Box<dyn RiskRule>>,
}

impl RiskEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn RiskRule>> = vec![
            Box::new(PowderyMildewRule),
            Box::new(RiceBlastRule),
            Box::new(AphidsRule),
        ];

        Self { rules }
    }

    /// Assess every registered disease, in registration order.
    pub fn evaluate(&self, weather: &WeatherObservation) -> Vec<DiseaseRisk> {
        self.rules
            .iter()
            .map(|rule| {
                let risk = rule.evaluate(weather);
                tracing::debug!(rule = rule.id(), level = %risk.risk_level, "assessed disease risk");
                risk
            })
            .collect()
    }

    /// Aggregate per-disease risks into one overall level: mean of the
    /// numeric scores, mapped back to a level.
    pub fn overall_risk(&self, weather: &WeatherObservation) -> RiskLevel {
        let risks = self.evaluate(weather);
        if risks.is_empty() {
            return RiskLevel::Low;
        }
        let sum: u32 = risks.iter().map(|r| u32::from(r.risk_level.score())).sum();
        RiskLevel::from_score(f64::from(sum) / risks.len() as f64)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn weather(temp: f64, humidity: f64, rain: f64) -> WeatherObservation {
        WeatherObservation {
            temperature: temp,
            humidity,
            rainfall_last_24h: rain,
            weather_description: "overcast clouds".into(),
            wind_speed: 3.0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn evaluates_one_risk_per_disease() {
        let engine = RiskEngine::new();
        let risks = engine.evaluate(&weather(25.0, 50.0, 0.0));
        assert_eq!(risks.len(), 3);
        assert_eq!(risks[0].disease, "Powdery Mildew (wheat)");
        assert_eq!(risks[1].disease, "Rice Blast");
        assert_eq!(risks[2].disease, "Aphids");
    }

    #[test]
    fn warm_humid_day_flags_high_mildew() {
        let engine = RiskEngine::new();
        let risks = engine.evaluate(&weather(25.0, 80.0, 0.0));
        assert_eq!(risks[0].risk_level, RiskLevel::High);
    }

    #[test]
    fn heavy_rain_flags_high_blast() {
        let engine = RiskEngine::new();
        let risks = engine.evaluate(&weather(27.0, 70.0, 30.0));
        assert_eq!(risks[1].risk_level, RiskLevel::High);
    }

    #[test]
    fn cool_humid_day_flags_aphids() {
        let engine = RiskEngine::new();
        let risks = engine.evaluate(&weather(18.0, 65.0, 2.0));
        assert!(matches!(
            risks[2].risk_level,
            RiskLevel::Medium | RiskLevel::High
        ));
    }

    #[test]
    fn overall_risk_averages_scores() {
        let engine = RiskEngine::new();
        // All three rules report Low on a cold dry day.
        assert_eq!(engine.overall_risk(&weather(5.0, 30.0, 0.0)), RiskLevel::Low);
        // Warm, very humid, heavy rain pushes mildew and blast to High.
        let level = engine.overall_risk(&weather(27.0, 80.0, 30.0));
        assert!(level >= RiskLevel::Medium);
    }
}
