use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

/// One entry of the static advisory rule table.
///
/// `soil` and `crop` are stored in their lower-cased canonical form; the
/// table is read-only after load. Duplicate (soil, crop) pairs are allowed
/// in source data - lookup resolves them first-match-wins in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRule {
    pub soil: String,
    pub crop: String,
    pub sowing_time: String,
    pub irrigation: String,
    pub fertilizer: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Inbound advisory query.
///
/// Required fields default to empty strings on deserialization so that a
/// missing field surfaces as a validation error rather than a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryQuery {
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub region: Option<String>,
}

impl AdvisoryQuery {
    pub fn new(
        soil_type: impl Into<String>,
        crop: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            soil_type: soil_type.into(),
            crop: crop.into(),
            region,
        }
    }

    /// Reject absent or whitespace-only required fields. Region is always
    /// optional and never inspected here.
    pub fn validate(&self) -> Result<()> {
        if self.soil_type.trim().is_empty() {
            return Err(AdvisorError::Validation(
                "soilType is required and must not be empty".into(),
            ));
        }
        if self.crop.trim().is_empty() {
            return Err(AdvisorError::Validation(
                "crop is required and must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Advisory field values, identical shape for matched and fallback branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub sowing_time: String,
    pub irrigation: String,
    pub fertilizer: String,
    /// Serialized as `null` when the source rule carries no notes.
    pub notes: Option<String>,
}

impl Guidance {
    pub fn from_rule(rule: &AdvisoryRule) -> Self {
        Self {
            sowing_time: rule.sowing_time.clone(),
            irrigation: rule.irrigation.clone(),
            fertilizer: rule.fertilizer.clone(),
            notes: rule.notes.clone(),
        }
    }
}

/// Resolved advisory response.
///
/// `soil_type` and `crop` hold the normalized (lowercased) query values;
/// `region` echoes the caller's input verbatim, or is empty when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub soil_type: String,
    pub crop: String,
    pub region: String,
    pub recommendation: Guidance,
}

impl Recommendation {
    pub fn new(
        soil_type: impl Into<String>,
        crop: impl Into<String>,
        region: impl Into<String>,
        recommendation: Guidance,
    ) -> Self {
        Self {
            soil_type: soil_type.into(),
            crop: crop.into(),
            region: region.into(),
            recommendation,
        }
    }
}
