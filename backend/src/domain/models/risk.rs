use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered outreach-urgency classification.
///
/// The ordering matters: `Low < Medium < High`. The minimal classifier rule
/// only emits `Low` and `High`; `Medium` is carried by hotspot severity tiers
/// and the weekly prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

impl RiskLevel {
    /// Parse a stored level string; anything unrecognized reads as `Low`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "HIGH" => RiskLevel::High,
            "MEDIUM" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Computed risk picture for one LGA at one moment.
///
/// Never persisted or cached: every assessment re-fetches weather so the
/// picture is always current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub lga: String,
    pub level: RiskLevel,
    pub rainfall_mm: f64,
    /// Human-readable contributing-risk labels, empty when nothing applies
    pub factors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(RiskLevel::High.to_string(), "HIGH");
        assert_eq!(RiskLevel::parse("medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("garbage"), RiskLevel::Low);
    }
}
