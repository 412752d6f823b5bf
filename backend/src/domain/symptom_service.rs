use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::domain::models::{RiskLevel, SymptomReport};
use crate::storage::csv::{CsvConnection, SymptomRepository, UserRepository};
use crate::storage::traits::{SymptomStorage, UserStorage};

/// How many of the most recent reports feed the health score.
const SCORE_WINDOW: usize = 3;

const FEVER_PENALTY: u32 = 15;
const VOMITING_PENALTY: u32 = 12;
const DIARRHEA_PENALTY: u32 = 12;
const COUGH_PENALTY: u32 = 8;
const HEADACHE_PENALTY: u32 = 5;
const FATIGUE_PENALTY: u32 = 5;

const HIGH_RISK_PENALTY: u32 = 10;
const MEDIUM_RISK_PENALTY: u32 = 5;

/// New symptom check-in, before an id and timestamp are assigned.
#[derive(Debug, Clone, Default)]
pub struct NewSymptomReport {
    pub fever: bool,
    pub cough: bool,
    pub headache: bool,
    pub fatigue: bool,
    pub diarrhea: bool,
    pub vomiting: bool,
    pub notes: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Service for symptom logging and the health-score aggregate.
#[derive(Clone)]
pub struct SymptomService {
    symptom_repository: SymptomRepository,
    user_repository: UserRepository,
}

impl SymptomService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            symptom_repository: SymptomRepository::new(connection.clone()),
            user_repository: UserRepository::new(connection),
        }
    }

    /// Append a report for an existing user.
    pub fn log_report(&self, user_id: &str, new: NewSymptomReport) -> Result<SymptomReport> {
        self.user_repository
            .get_user(user_id)?
            .ok_or_else(|| anyhow::anyhow!("user not found: {user_id}"))?;

        let report = SymptomReport {
            id: SymptomReport::generate_id(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            fever: new.fever,
            cough: new.cough,
            headache: new.headache,
            fatigue: new.fatigue,
            diarrhea: new.diarrhea,
            vomiting: new.vomiting,
            notes: new.notes,
            lat: new.lat,
            lon: new.lon,
        };
        self.symptom_repository.store_report(&report)?;

        info!(
            "symptom report stored for user {user_id} (any symptom: {})",
            report.any_symptom()
        );
        Ok(report)
    }

    /// All reports for a user, most recent first.
    pub fn list_reports(&self, user_id: &str) -> Result<Vec<SymptomReport>> {
        self.symptom_repository.list_reports_for_user(user_id)
    }

    /// Health score for a user given their current risk level.
    pub fn score_for_user(&self, user_id: &str, current_risk: RiskLevel) -> Result<u8> {
        let reports = self.symptom_repository.list_reports_for_user(user_id)?;
        Ok(health_score(current_risk, &reports))
    }
}

/// Compute the 0..=100 health score.
///
/// Starts at 100 and subtracts per-flag penalties over the most recent
/// [`SCORE_WINDOW`] reports, plus a penalty for the current environmental
/// risk. `reports` must be ordered most recent first.
pub fn health_score(current_risk: RiskLevel, reports: &[SymptomReport]) -> u8 {
    let mut penalty: u32 = match current_risk {
        RiskLevel::High => HIGH_RISK_PENALTY,
        RiskLevel::Medium => MEDIUM_RISK_PENALTY,
        RiskLevel::Low => 0,
    };

    for report in reports.iter().take(SCORE_WINDOW) {
        if report.fever {
            penalty += FEVER_PENALTY;
        }
        if report.vomiting {
            penalty += VOMITING_PENALTY;
        }
        if report.diarrhea {
            penalty += DIARRHEA_PENALTY;
        }
        if report.cough {
            penalty += COUGH_PENALTY;
        }
        if report.headache {
            penalty += HEADACHE_PENALTY;
        }
        if report.fatigue {
            penalty += FATIGUE_PENALTY;
        }
    }

    100u32.saturating_sub(penalty) as u8
}
