mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod server;
mod store;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{weather::city_coordinates, MockWeatherProvider};
use error::{AdvisorError, Result};
use logic::alerts::{build_alert_report, AlertOptions};
use logic::{Resolver, RiskEngine, RuleTable};
use models::AdvisoryQuery;
use server::AppState;
use std::sync::Arc;
use store::{FeedbackRecord, FeedbackStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        config: config_override,
        data_dir: data_dir_override,
        ..
    } = cli;

    match command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Advise {
            soil_type,
            crop,
            region,
            rules,
        } => {
            let config = load_config(&config_override)?;
            let rules_path = rules.unwrap_or(config.advisory.rules_file);
            let table = Arc::new(RuleTable::load(&rules_path));
            let resolver = Resolver::new(table);

            let query = AdvisoryQuery::new(soil_type, crop, region);
            let recommendation = resolver.resolve(&query)?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
            Ok(())
        }
        Commands::Alerts {
            lat,
            lon,
            city,
            days,
            include_outlook,
            include_historical,
            include_feedback,
            feedback,
            advisory_export,
        } => {
            let config = load_config(&config_override)?;
            let data_dir = Config::data_dir(data_dir_override.as_ref())?;
            let provider = MockWeatherProvider::new(&data_dir, config.weather.cache_ttl_minutes);
            let engine = RiskEngine::new();
            let feedback_store = FeedbackStore::new(&data_dir);

            let (lat, lon) = resolve_cli_location(lat, lon, city.as_deref())?;

            let opts = AlertOptions {
                outlook_days: days,
                include_outlook,
                include_historical,
                historical_days: 3,
                include_prev_risk: false,
                advisory_export,
            };
            let report = build_alert_report(&engine, &provider, lat, lon, city, &opts);

            let mut doc = serde_json::to_value(&report)?;
            if include_feedback {
                doc["feedback"] = serde_json::to_value(feedback_store.load())?;
            }
            if let Some(text) = feedback {
                feedback_store.append(FeedbackRecord {
                    text,
                    weather: Some(report.weather.clone()),
                    overall: Some(report.overall_risk),
                });
                doc["feedback_submitted"] = serde_json::Value::Bool(true);
            }

            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Commands::Serve { bind } => {
            let config = load_config(&config_override)?;
            let data_dir = Config::data_dir(data_dir_override.as_ref())?;

            let table = Arc::new(RuleTable::load(&config.advisory.rules_file));
            let state = Arc::new(AppState {
                resolver: Resolver::new(table),
                risk_engine: RiskEngine::new(),
                weather: std::sync::Mutex::new(MockWeatherProvider::new(
                    &data_dir,
                    config.weather.cache_ttl_minutes,
                )),
            });

            let bind = bind.unwrap_or(config.server.bind);
            server::serve(state, &bind).await
        }
        Commands::Check => {
            let config_found = Config::exists(config_override.as_ref());
            let config = load_config(&config_override)?;

            let table = RuleTable::load(&config.advisory.rules_file);
            let data_dir = Config::data_dir(data_dir_override.as_ref())?;
            let provider = MockWeatherProvider::new(&data_dir, config.weather.cache_ttl_minutes);
            let probe = provider.current(12.9716, 77.5946);

            println!(
                "Config: {}",
                if config_found { "OK" } else { "not found (using defaults)" }
            );
            println!(
                "Rule table ({}): {}",
                config.advisory.rules_file.display(),
                if table.is_empty() {
                    "EMPTY (generic fallback only)".to_string()
                } else {
                    format!("{} rules", table.len())
                }
            );
            println!("Data dir: {}", data_dir.display());
            println!(
                "Weather probe (Bengaluru): {:.1}°C, {:.0}% humidity, {}",
                probe.temperature, probe.humidity, probe.weather_description
            );
            Ok(())
        }
    }
}

/// Config is ambient for query commands: a missing file means defaults, not
/// a refusal to answer.
fn load_config(config_override: &Option<std::path::PathBuf>) -> Result<Config> {
    if Config::exists(config_override.as_ref()) {
        Config::load(config_override.clone())
    } else {
        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }
}

/// CLI location resolution mirrors the demo tooling: unknown city names
/// fall back to Bengaluru rather than failing.
fn resolve_cli_location(
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<&str>,
) -> Result<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (lat, lon) {
        return Ok((lat, lon));
    }
    if let Some(city) = city {
        return Ok(city_coordinates(city).unwrap_or_else(|| {
            tracing::warn!(city, "unknown city, defaulting to Bengaluru");
            (12.9716, 77.5946)
        }));
    }
    Err(AdvisorError::Validation(
        "Provide --lat/--lon or --city".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_coordinates_win() {
        let (lat, lon) = resolve_cli_location(Some(1.0), Some(2.0), Some("Delhi")).unwrap();
        assert_eq!((lat, lon), (1.0, 2.0));
    }

    #[test]
    fn known_city_resolves() {
        let (lat, lon) = resolve_cli_location(None, None, Some("Delhi")).unwrap();
        assert_eq!((lat, lon), (28.6139, 77.2090));
    }

    #[test]
    fn unknown_city_defaults_to_bengaluru() {
        let (lat, lon) = resolve_cli_location(None, None, Some("Atlantis")).unwrap();
        assert_eq!((lat, lon), (12.9716, 77.5946));
    }

    #[test]
    fn no_location_is_an_error() {
        assert!(matches!(
            resolve_cli_location(None, None, None),
            Err(AdvisorError::Validation(_))
        ));
    }

    #[test]
    fn partial_coordinates_fall_through_to_error() {
        assert!(resolve_cli_location(Some(1.0), None, None).is_err());
    }
}
