use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single weather observation, current or forecast.
///
/// Units: temperature in Celsius, humidity in percent, rainfall in
/// millimetres over the trailing 24 hours, wind speed in m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall_last_24h: f64,
    pub weather_description: String,
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

/// Location of an alert query, echoed in responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}
