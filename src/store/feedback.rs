use crate::models::{RiskLevel, WeatherObservation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub text: String,
    pub weather: Option<WeatherObservation>,
    pub overall: Option<RiskLevel>,
}

/// Append-only JSON file of free-text feedback.
///
/// Reads degrade to an empty list; write failures are logged and swallowed
/// so feedback never takes down an advisory flow.
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(data_dir: &std::path::Path) -> Self {
        Self {
            path: data_dir.join("feedback.json"),
        }
    }

    pub fn load(&self) -> Vec<FeedbackRecord> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn append(&self, record: FeedbackRecord) {
        let mut records = self.load();
        records.push(record);
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(&records)?;
            std::fs::write(&self.path, raw)
        })();
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save feedback");
        }
    }
}
