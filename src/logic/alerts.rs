use crate::datasources::MockWeatherProvider;
use crate::logic::advisory_text::generate_advisory_text;
use crate::logic::rules::RiskEngine;
use crate::models::{DiseaseRisk, Location, RiskLevel, WeatherObservation};
use serde::Serialize;

/// Sections of the alert document beyond the always-present core.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertOptions {
    pub outlook_days: u32,
    pub include_outlook: bool,
    pub include_historical: bool,
    /// Snapshot window for the historical section: the web document carries
    /// the last two days, the CLI export the last three.
    pub historical_days: usize,
    pub include_prev_risk: bool,
    pub advisory_export: bool,
}

impl AlertOptions {
    /// The HTTP endpoint always returns the full document.
    pub fn full(outlook_days: u32) -> Self {
        Self {
            outlook_days,
            include_outlook: true,
            include_historical: true,
            historical_days: 2,
            include_prev_risk: true,
            advisory_export: false,
        }
    }
}

/// Weather-driven disease alert document.
#[derive(Debug, Clone, Serialize)]
pub struct AlertReport {
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub weather: WeatherObservation,
    pub overall_risk: RiskLevel,
    pub risks: Vec<DiseaseRisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical: Option<Vec<WeatherObservation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_risk: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlook: Option<Vec<WeatherObservation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory_text: Option<String>,
}

/// Assemble an alert document for a location: current mock weather, the
/// per-disease risk assessments, the aggregate level, and any requested
/// optional sections.
pub fn build_alert_report(
    engine: &RiskEngine,
    provider: &MockWeatherProvider,
    lat: f64,
    lon: f64,
    city: Option<String>,
    opts: &AlertOptions,
) -> AlertReport {
    let weather = provider.current(lat, lon);
    let risks = engine.evaluate(&weather);
    let overall_risk = engine.overall_risk(&weather);

    let historical = opts
        .include_historical
        .then(|| provider.historical(lat, lon, opts.historical_days));

    // Risk of the most recent recorded snapshot; falls back to the current
    // level when no history exists yet.
    let prev_risk = opts.include_prev_risk.then(|| {
        provider
            .historical(lat, lon, 1)
            .last()
            .map(|w| engine.overall_risk(w))
            .unwrap_or(overall_risk)
    });

    let outlook = opts
        .include_outlook
        .then(|| provider.outlook(lat, lon, opts.outlook_days));

    let advisory_text = opts
        .advisory_export
        .then(|| generate_advisory_text(overall_risk, &risks));

    provider.save_snapshot(lat, lon, &weather);

    AlertReport {
        location: Location { lat, lon },
        city,
        weather,
        overall_risk,
        risks,
        historical,
        prev_risk,
        outlook,
        advisory_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_sections_are_always_present() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();

        let report = build_alert_report(
            &engine,
            &provider,
            12.9716,
            77.5946,
            Some("Bengaluru".into()),
            &AlertOptions::default(),
        );
        assert_eq!(report.risks.len(), 3);
        assert!(report.historical.is_none());
        assert!(report.outlook.is_none());
        assert!(report.advisory_text.is_none());
    }

    #[test]
    fn full_report_includes_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();

        let report = build_alert_report(
            &engine,
            &provider,
            12.9716,
            77.5946,
            None,
            &AlertOptions::full(7),
        );
        assert_eq!(report.outlook.as_ref().unwrap().len(), 7);
        assert!(report.historical.is_some());
        assert!(report.prev_risk.is_some());
    }

    #[test]
    fn prev_risk_uses_last_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();
        let opts = AlertOptions {
            include_prev_risk: true,
            ..Default::default()
        };

        // First call has no history and echoes the current level; it also
        // records a snapshot that the second call reads back.
        let first = build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        assert_eq!(first.prev_risk, Some(first.overall_risk));
        let second = build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        assert_eq!(second.prev_risk, Some(first.overall_risk));
    }

    #[test]
    fn full_document_limits_history_to_two_entries() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();
        let opts = AlertOptions::full(1);

        // Each call appends one snapshot; the fourth sees three recorded
        // days but must surface only the trailing two.
        for _ in 0..3 {
            build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        }
        let report = build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        assert_eq!(report.historical.unwrap().len(), 2);
    }

    #[test]
    fn historical_window_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();
        let opts = AlertOptions {
            include_historical: true,
            historical_days: 3,
            ..Default::default()
        };

        for _ in 0..4 {
            build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        }
        let report = build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        assert_eq!(report.historical.unwrap().len(), 3);
    }

    #[test]
    fn advisory_export_renders_text() {
        let dir = tempfile::tempdir().unwrap();
        let provider = MockWeatherProvider::new(dir.path(), 30);
        let engine = RiskEngine::new();
        let opts = AlertOptions {
            advisory_export: true,
            ..Default::default()
        };

        let report = build_alert_report(&engine, &provider, 12.9716, 77.5946, None, &opts);
        let text = report.advisory_text.unwrap();
        assert!(text.starts_with("Overall Risk: "));
    }
}
