//! Disease hotspot registry.
//!
//! Read-only reference data mapping normalized LGA names to their current
//! outbreak status, compiled from NCDC situation reports.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::models::RiskLevel;

/// Outbreak status for one LGA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotRecord {
    pub disease: &'static str,
    pub severity: RiskLevel,
    /// Provenance of the classification
    pub source: &'static str,
}

static HOTSPOTS: Lazy<HashMap<&'static str, HotspotRecord>> = Lazy::new(|| {
    HashMap::from([
        (
            "kano",
            HotspotRecord {
                disease: "Lassa fever",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 7 2026",
            },
        ),
        (
            "benue",
            HotspotRecord {
                disease: "Lassa fever",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 7 2026",
            },
        ),
        (
            "sokoto",
            HotspotRecord {
                disease: "Malaria",
                severity: RiskLevel::High,
                source: "NCDC Weekly Epidemiological Report Feb 2026",
            },
        ),
        (
            "lagos",
            HotspotRecord {
                disease: "Cholera",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 6 2026",
            },
        ),
        (
            "abuja",
            HotspotRecord {
                disease: "Malaria",
                severity: RiskLevel::Medium,
                source: "NCDC Weekly Epidemiological Report Feb 2026",
            },
        ),
        (
            "kaduna",
            HotspotRecord {
                disease: "Lassa fever",
                severity: RiskLevel::Medium,
                source: "NCDC Situation Report Week 7 2026",
            },
        ),
        (
            "maiduguri",
            HotspotRecord {
                disease: "Cholera",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 6 2026",
            },
        ),
        (
            "plateau",
            HotspotRecord {
                disease: "Cholera",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 8 2026",
            },
        ),
        (
            "zamfara",
            HotspotRecord {
                disease: "Cholera",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 8 2026",
            },
        ),
        (
            "cross river",
            HotspotRecord {
                disease: "Cholera",
                severity: RiskLevel::High,
                source: "NCDC Situation Report Week 8 2026",
            },
        ),
        (
            "enugu",
            HotspotRecord {
                disease: "Malaria",
                severity: RiskLevel::Medium,
                source: "NCDC Weekly Epidemiological Report Feb 2026",
            },
        ),
    ])
});

/// Look up outbreak status for an LGA. Keys are normalized (trimmed,
/// lowercased) before lookup.
pub fn lookup(lga: &str) -> Option<HotspotRecord> {
    HOTSPOTS.get(lga.trim().to_lowercase().as_str()).copied()
}

/// True when the LGA is listed as a hotspot.
pub fn is_hotspot(lga: &str) -> bool {
    lookup(lga).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        assert!(is_hotspot("Kano"));
        assert!(is_hotspot("  LAGOS "));
        assert!(is_hotspot("Cross River"));
    }

    #[test]
    fn non_hotspot_returns_none() {
        assert!(lookup("Ikeja").is_none());
        assert!(!is_hotspot("Port Harcourt"));
    }

    #[test]
    fn record_carries_disease_and_severity() {
        let record = lookup("benue").unwrap();
        assert_eq!(record.disease, "Lassa fever");
        assert_eq!(record.severity, RiskLevel::High);
        assert!(record.source.contains("NCDC"));
    }
}
