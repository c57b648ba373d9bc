use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Numeric score used for aggregation across diseases.
    pub fn score(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Map an averaged score back to a level.
    pub fn from_score(score: f64) -> Self {
        if score >= 2.5 {
            RiskLevel::High
        } else if score >= 1.75 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-disease risk assessment produced by a risk rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRisk {
    pub disease: String,
    pub risk_level: RiskLevel,
    pub reason: String,
    pub suggestion: String,
}
