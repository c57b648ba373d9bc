use crate::models::WeatherObservation;
use chrono::{Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const DESCRIPTIONS: &[&str] = &[
    "clear sky",
    "few clouds",
    "scattered clouds",
    "broken clouds",
    "overcast clouds",
    "light rain",
    "moderate rain",
];

const OUTLOOK_DESCRIPTIONS: &[&str] = &[
    "clear sky",
    "few clouds",
    "scattered clouds",
    "broken clouds",
    "overcast clouds",
    "light rain",
];

/// Known demo city coordinates.
pub fn city_coordinates(city: &str) -> Option<(f64, f64)> {
    match city.trim().to_lowercase().as_str() {
        "bengaluru" => Some((12.9716, 77.5946)),
        "delhi" => Some((28.6139, 77.2090)),
        "mumbai" => Some((19.0760, 72.8777)),
        "chennai" => Some((13.0827, 80.2707)),
        "kolkata" => Some((22.5726, 88.3639)),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    ts: i64,
    weather: WeatherObservation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    key: String,
    weather: WeatherObservation,
    ts: i64,
}

/// Deterministic mock weather source.
///
/// Generates location-seeded observations with no network calls, backed by
/// a TTL'd JSON file cache and an append-only snapshot history. Unreadable
/// state files degrade to empty rather than failing a query.
pub struct MockWeatherProvider {
    provider: String,
    cache_file: PathBuf,
    snapshots_file: PathBuf,
    cache_ttl_minutes: i64,
}

impl MockWeatherProvider {
    pub fn new(data_dir: &std::path::Path, cache_ttl_minutes: i64) -> Self {
        Self {
            provider: "mock".into(),
            cache_file: data_dir.join("weather_cache.json"),
            snapshots_file: data_dir.join("weather_snapshots.json"),
            cache_ttl_minutes,
        }
    }

    fn cache_key(&self, lat: f64, lon: f64) -> String {
        format!("{}:{:.4}:{:.4}", self.provider, lat, lon)
    }

    fn location_seed(lat: f64, lon: f64) -> u64 {
        (lat * 1000.0 + lon) as i64 as u64
    }

    fn generate(lat: f64, lon: f64) -> WeatherObservation {
        let mut rng = StdRng::seed_from_u64(Self::location_seed(lat, lon));

        // Warmer near the equator.
        let base_temp = 25.0 + (lat - 12.0) * 0.5;
        let temperature = round1(base_temp + rng.gen_range(-3.0..3.0));

        let humidity = f64::from(rng.gen_range(60..=85));
        let rainfall = if rng.gen::<f64>() > 0.6 {
            round1(rng.gen_range(0.0..25.0))
        } else {
            0.0
        };
        let wind_speed = round1(rng.gen_range(1.0..8.0));
        let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];

        WeatherObservation {
            temperature,
            humidity,
            rainfall_last_24h: rainfall,
            weather_description: description.to_string(),
            wind_speed,
            timestamp: Utc::now(),
        }
    }

    /// Current conditions for a location, served from the file cache while
    /// the entry is fresh.
    pub fn current(&self, lat: f64, lon: f64) -> WeatherObservation {
        if let Some(cached) = self.cached(lat, lon) {
            return cached;
        }

        let weather = Self::generate(lat, lon);
        self.store_cached(lat, lon, &weather);
        weather
    }

    /// Multi-day outlook: the base observation perturbed per day with a
    /// day-offset seed, so repeated calls agree.
    pub fn outlook(&self, lat: f64, lon: f64, days: u32) -> Vec<WeatherObservation> {
        let base = Self::generate(lat, lon);
        let seed = Self::location_seed(lat, lon);

        (0..days)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(i)));
                let temp_variation = rng.gen_range(-2.0..2.0);
                let hum_variation = f64::from(rng.gen_range(-10..=10));
                let rain_chance = rng.gen::<f64>();
                let description =
                    OUTLOOK_DESCRIPTIONS[rng.gen_range(0..OUTLOOK_DESCRIPTIONS.len())];

                WeatherObservation {
                    temperature: round1(base.temperature + temp_variation),
                    humidity: (base.humidity + hum_variation).clamp(40.0, 95.0),
                    rainfall_last_24h: if rain_chance > 0.7 {
                        round1(rng.gen_range(0.0..20.0))
                    } else {
                        0.0
                    },
                    weather_description: description.to_string(),
                    wind_speed: round1(rng.gen_range(1.0..8.0)),
                    timestamp: Utc::now() + Duration::days(i64::from(i)),
                }
            })
            .collect()
    }

    /// Last `days` recorded snapshots for this location, oldest first.
    pub fn historical(&self, lat: f64, lon: f64, days: usize) -> Vec<WeatherObservation> {
        let key = self.cache_key(lat, lon);
        let snaps = self.read_snapshots();
        let mut hist: Vec<WeatherObservation> = snaps
            .into_iter()
            .filter(|s| s.key == key)
            .map(|s| s.weather)
            .collect();
        if hist.len() > days {
            hist.drain(..hist.len() - days);
        }
        hist
    }

    /// Record an observation in the snapshot history.
    pub fn save_snapshot(&self, lat: f64, lon: f64, weather: &WeatherObservation) {
        let mut snaps = self.read_snapshots();
        snaps.push(Snapshot {
            key: self.cache_key(lat, lon),
            weather: weather.clone(),
            ts: Utc::now().timestamp(),
        });
        if let Err(e) = self.write_json(&self.snapshots_file, &snaps) {
            tracing::warn!(error = %e, "failed to write weather snapshots");
        }
    }

    fn cached(&self, lat: f64, lon: f64) -> Option<WeatherObservation> {
        let cache = self.read_cache();
        let entry = cache.get(&self.cache_key(lat, lon))?;
        let age = Utc::now().timestamp() - entry.ts;
        if age > self.cache_ttl_minutes * 60 {
            return None;
        }
        Some(entry.weather.clone())
    }

    fn store_cached(&self, lat: f64, lon: f64, weather: &WeatherObservation) {
        let mut cache = self.read_cache();
        cache.insert(
            self.cache_key(lat, lon),
            CacheEntry {
                ts: Utc::now().timestamp(),
                weather: weather.clone(),
            },
        );
        if let Err(e) = self.write_json(&self.cache_file, &cache) {
            tracing::warn!(error = %e, "failed to write weather cache");
        }
    }

    fn read_cache(&self) -> HashMap<String, CacheEntry> {
        read_json_or_default(&self.cache_file)
    }

    fn read_snapshots(&self) -> Vec<Snapshot> {
        read_json_or_default(&self.snapshots_file)
    }

    fn write_json<T: Serialize>(&self, path: &std::path::Path, value: &T) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(value)?;
        std::fs::write(path, raw)
    }
}

fn read_json_or_default<T: Default + for<'de> Deserialize<'de>>(path: &std::path::Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "unreadable state file, starting empty");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
