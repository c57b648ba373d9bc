use crate::models::{DiseaseRisk, RiskLevel};

/// Render an overall risk level plus per-disease assessments as plain text
/// suitable for printing or SMS-style distribution.
pub fn generate_advisory_text(overall: RiskLevel, risks: &[DiseaseRisk]) -> String {
    let mut lines = vec![format!("Overall Risk: {}", overall), String::new()];
    for r in risks {
        lines.push(format!("- {}: {}", r.disease, r.risk_level));
        lines.push(format!("  Reason: {}", r.reason));
        lines.push(format!("  Suggestion: {}", r.suggestion));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_overall_and_per_disease_blocks() {
        let risks = vec![DiseaseRisk {
            disease: "Rice Blast".into(),
            risk_level: RiskLevel::High,
            reason: "Heavy rain.".into(),
            suggestion: "Check drainage.".into(),
        }];
        let text = generate_advisory_text(RiskLevel::Medium, &risks);
        assert!(text.starts_with("Overall Risk: Medium\n"));
        assert!(text.contains("- Rice Blast: High"));
        assert!(text.contains("  Reason: Heavy rain."));
        assert!(text.contains("  Suggestion: Check drainage."));
    }

    #[test]
    fn empty_risks_still_render_header() {
        let text = generate_advisory_text(RiskLevel::Low, &[]);
        assert_eq!(text, "Overall Risk: Low\n");
    }
}
