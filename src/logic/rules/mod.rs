pub mod aphids;
pub mod engine;
pub mod powdery_mildew;
pub mod rice_blast;

pub use engine::RiskEngine;

use crate::models::{DiseaseRisk, WeatherObservation};

/// Trait for weather-driven disease risk heuristics.
///
/// Unlike a gating rule, every risk rule always yields an assessment - a
/// quiet day still reports Low for its disease.
pub trait RiskRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Disease name as shown to the caller
    fn disease(&self) -> &'static str;

    /// Assess the risk for the given weather observation
    fn evaluate(&self, weather: &WeatherObservation) -> DiseaseRisk;
}
