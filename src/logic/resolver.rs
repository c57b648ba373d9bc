use crate::error::{AdvisorError, Result};
use crate::models::{AdvisoryQuery, AdvisoryRule, Guidance, Recommendation};
use std::path::Path;
use std::sync::Arc;

/// Generic guidance returned when no rule matches a (soil, crop) pair.
const FALLBACK_SOWING_TIME: &str = "Consult your local agricultural extension for timing";
const FALLBACK_IRRIGATION: &str = "Irrigate based on soil moisture; avoid waterlogging";
const FALLBACK_FERTILIZER: &str = "Apply a balanced NPK fertilizer after a soil test";
const FALLBACK_NOTES: &str = "No exact match found for this soil/crop combination; generic guidance provided";

/// Immutable advisory rule table.
///
/// Loaded once and shared read-only; a reload is a new table swapped in
/// behind an `Arc`, never an in-place mutation.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<AdvisoryRule>,
}

impl RuleTable {
    /// Build a table from already-loaded rules. Soil and crop keys are
    /// canonicalized to lowercase; source order is preserved.
    pub fn new(rules: Vec<AdvisoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|mut r| {
                r.soil = r.soil.trim().to_lowercase();
                r.crop = r.crop.trim().to_lowercase();
                r
            })
            .collect();
        Self { rules }
    }

    /// Load the table from a JSON file.
    ///
    /// A missing or malformed file degrades to an empty table so every
    /// query falls through to the generic fallback; the process never
    /// hard-fails on bad rule data.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(table) => {
                tracing::info!(rules = table.len(), path = %path.display(), "loaded rule table");
                table
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "rule table unavailable, serving generic fallback only");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AdvisorError::DataLoad(format!("{}: {}", path.display(), e)))?;
        let rules: Vec<AdvisoryRule> = serde_json::from_str(&raw)
            .map_err(|e| AdvisorError::DataLoad(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(rules))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching the already-normalized (soil, crop) pair, in
    /// table order.
    fn find(&self, soil: &str, crop: &str) -> Option<&AdvisoryRule> {
        self.rules.iter().find(|r| r.soil == soil && r.crop == crop)
    }
}

/// Looks up advisory guidance for a (soil, crop) query against an injected
/// immutable rule table, falling back to generic guidance on a miss.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<RuleTable>,
}

impl Resolver {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Resolve a query to a recommendation.
    ///
    /// Matching is case-insensitive: the query's soil type and crop are
    /// lowercased before a linear scan of the table, first match wins.
    /// Region never participates in matching; it is echoed back verbatim
    /// (empty string when absent). Fails only on validation - a table miss
    /// returns the generic fallback payload instead.
    pub fn resolve(&self, query: &AdvisoryQuery) -> Result<Recommendation> {
        query.validate()?;

        let soil = query.soil_type.trim().to_lowercase();
        let crop = query.crop.trim().to_lowercase();
        let region = query.region.clone().unwrap_or_default();

        let guidance = match self.table.find(&soil, &crop) {
            Some(rule) => Guidance::from_rule(rule),
            None => Guidance {
                sowing_time: FALLBACK_SOWING_TIME.into(),
                irrigation: FALLBACK_IRRIGATION.into(),
                fertilizer: FALLBACK_FERTILIZER.into(),
                notes: Some(FALLBACK_NOTES.into()),
            },
        };

        Ok(Recommendation::new(soil, crop, region, guidance))
    }
}
