//! Risk classification.
//!
//! Pure function of (LGA, rainfall): no I/O, deterministic, safe to call from
//! anywhere. Weather fetching and hotspot data live elsewhere; this module
//! only combines them.

use super::hotspots;
use super::models::{RiskAssessment, RiskLevel};

/// Rainfall over this (mm in the trailing 24 h) marks elevated mosquito risk
/// and raises the level to HIGH on its own.
pub const RAINFALL_THRESHOLD_MM: f64 = 15.0;

/// Above this, standing water contamination becomes a concern. Contributes a
/// factor label only; the level is already decided by the first threshold.
pub const CHOLERA_RAINFALL_THRESHOLD_MM: f64 = 20.0;

/// Classify one LGA given measured rainfall.
///
/// Level is HIGH when the LGA is a hotspot or rainfall exceeds
/// [`RAINFALL_THRESHOLD_MM`]; LOW otherwise. Factor labels are appended
/// independently: each label appears whenever its own condition holds.
pub fn classify(lga: &str, rainfall_mm: f64) -> RiskAssessment {
    let hotspot = hotspots::lookup(lga);

    let mut factors = Vec::new();
    if let Some(record) = hotspot {
        if record.severity >= RiskLevel::High {
            factors.push(format!("Active {} outbreak in your area", record.disease));
        } else {
            factors.push(format!("{} cases reported nearby", record.disease));
        }
    }
    if rainfall_mm > RAINFALL_THRESHOLD_MM {
        factors.push(format!(
            "Heavy rainfall ({rainfall_mm:.1}mm) - increased mosquito breeding"
        ));
    }
    if rainfall_mm > CHOLERA_RAINFALL_THRESHOLD_MM {
        factors.push("Possible water contamination - cholera risk".to_string());
    }

    let level = if hotspot.is_some() || rainfall_mm > RAINFALL_THRESHOLD_MM {
        RiskLevel::High
    } else {
        RiskLevel::Low
    };

    RiskAssessment {
        lga: lga.to_string(),
        level,
        rainfall_mm,
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_location_with_light_rain_is_low_with_no_factors() {
        let assessment = classify("Ikeja", 3.0);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.factors.is_empty());
    }

    #[test]
    fn rainfall_exactly_at_threshold_stays_low() {
        let assessment = classify("Ikeja", RAINFALL_THRESHOLD_MM);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.factors.is_empty());
    }

    #[test]
    fn hotspot_is_high_regardless_of_rainfall() {
        let assessment = classify("Kano", 0.0);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.factors.iter().any(|f| f.contains("Lassa fever")));
    }

    #[test]
    fn heavy_rain_alone_is_high_with_rain_factor() {
        let assessment = classify("Ikeja", 16.2);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.factors.len(), 1);
        assert!(assessment.factors[0].contains("16.2mm"));
    }

    #[test]
    fn very_heavy_rain_adds_cholera_factor() {
        let assessment = classify("Ikeja", 25.0);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.factors.iter().any(|f| f.contains("mosquito")));
        assert!(assessment.factors.iter().any(|f| f.contains("cholera")));
    }

    #[test]
    fn rain_at_cholera_threshold_does_not_add_cholera_factor() {
        let assessment = classify("Ikeja", CHOLERA_RAINFALL_THRESHOLD_MM);
        assert!(assessment.factors.iter().all(|f| !f.contains("cholera")));
    }

    #[test]
    fn hotspot_and_heavy_rain_stack_factors() {
        let assessment = classify("Lagos", 22.0);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.factors.len(), 3);
    }

    #[test]
    fn medium_severity_hotspot_uses_softer_label_but_still_high() {
        let assessment = classify("Abuja", 0.0);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.factors.iter().any(|f| f.contains("cases reported nearby")));
    }
}
