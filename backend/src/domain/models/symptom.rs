use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One self-reported symptom check-in. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub fever: bool,
    pub cough: bool,
    pub headache: bool,
    pub fatigue: bool,
    pub diarrhea: bool,
    pub vomiting: bool,
    pub notes: String,
    /// Precise position at report time, when the client could supply one
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl SymptomReport {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// True when any symptom flag is set.
    pub fn any_symptom(&self) -> bool {
        self.fever || self.cough || self.headache || self.fatigue || self.diarrhea || self.vomiting
    }
}
