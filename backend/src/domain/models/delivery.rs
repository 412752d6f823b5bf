use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::risk::{RiskAssessment, RiskLevel};

/// Durable record of one outreach attempt.
///
/// Created once at dispatch time; `response` stays `None` until the recipient
/// answers, then holds the last recorded answer (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLog {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub risk_level: RiskLevel,
    /// The warning script as spoken/shown to the recipient
    pub script: String,
    pub audio_url: Option<String>,
    pub response: Option<String>,
}

impl DeliveryLog {
    pub fn new(
        user_id: &str,
        risk_level: RiskLevel,
        script: String,
        audio_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            risk_level,
            script,
            audio_url,
            response: None,
        }
    }
}

/// How an initiated warning went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMethod {
    /// Placed as a real call through the telephony provider
    Telephony,
    /// Returned to the client for local rendering
    Simulation,
}

/// Result of one dispatch decision.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    /// Risk was too low for outreach; nothing was written or sent
    NotNeeded { assessment: RiskAssessment },
    /// A delivery log was written and the warning went out (or is ready for
    /// the client to render)
    Initiated {
        assessment: RiskAssessment,
        log: DeliveryLog,
        method: CallMethod,
        /// Provider-assigned call reference, only for real calls
        call_sid: Option<String>,
    },
}
