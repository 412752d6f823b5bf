use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for `POST /register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    /// Phone number in international format; uniqueness key for registration
    pub phone: String,
    /// Local Government Area the user lives in
    pub lga: String,
    /// Message personality key; defaults to "caring_neighbor" when omitted
    pub personality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub lga: String,
    pub personality: String,
    /// RFC 3339 registration timestamp
    pub registered_at: String,
}

/// Request body for `PUT /users/{id}/personality`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePersonalityRequest {
    pub personality: String,
}

/// Response for `GET /risk-check/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCheckResponse {
    pub user_id: String,
    pub lga: String,
    /// "LOW" | "MEDIUM" | "HIGH"
    pub risk: String,
    pub rainfall_mm: f64,
    pub factors: Vec<String>,
}

/// One outreach attempt and its (eventual) response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLogDto {
    pub id: String,
    pub user_id: String,
    /// RFC 3339 creation timestamp
    pub timestamp: String,
    pub risk_level: String,
    pub script: String,
    pub audio_url: Option<String>,
    /// Null until the recipient answers; "fever" or "fine" afterwards
    pub response: Option<String>,
}

/// How a warning was (or would be) delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// A real call was placed through the telephony provider
    Twilio,
    /// No provider (or the call failed); the client renders the call locally
    Simulation,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Twilio => write!(f, "twilio"),
            Self::Simulation => write!(f, "simulation"),
        }
    }
}

/// Response for `PUT /call-user/{user_id}`.
///
/// `status` is "ok" when risk was too low for outreach and "call_initiated"
/// otherwise; the optional fields are only present for initiated calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallOutcomeDto {
    pub status: String,
    pub risk: String,
    pub rainfall_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<DeliveryMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// JSON body accepted by `POST /respond/{log_id}` (simulation clients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondPayload {
    /// "fever" or "fine"
    pub response: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondResult {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityDto {
    pub name: String,
    pub address: String,
    pub lga: String,
}

/// Response for `GET /facilities/{lga}`: either the LGA's default facility
/// or the generic recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLookupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Request body for `POST /symptoms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRequest {
    pub user_id: String,
    #[serde(default)]
    pub fever: bool,
    #[serde(default)]
    pub cough: bool,
    #[serde(default)]
    pub headache: bool,
    #[serde(default)]
    pub fatigue: bool,
    #[serde(default)]
    pub diarrhea: bool,
    #[serde(default)]
    pub vomiting: bool,
    #[serde(default)]
    pub notes: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReportDto {
    pub id: String,
    pub user_id: String,
    pub timestamp: String,
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

/// Aggregate for the dashboard (`GET /me/{user_id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: UserDto,
    pub logs: Vec<DeliveryLogDto>,
    pub symptoms: Vec<SymptomReportDto>,
    /// 0..=100, computed from the most recent symptom reports + current risk
    pub health_score: u8,
    pub current_risk: String,
    pub rainfall_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDto {
    pub id: String,
    pub user_id: String,
    pub timestamp: String,
    pub title: String,
    pub body: String,
    /// "rain" | "prediction" | "tip" | "alert"
    pub category: String,
    pub read: bool,
}

/// Current state of the weather override (`GET /mock-rain`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockRainState {
    pub enabled: bool,
}

/// Request body for `POST /mock-rain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockRainRequest {
    pub enabled: bool,
    /// When present, a best-effort notification is pushed to this user
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipDto {
    pub category: String,
    pub title: String,
    pub content: String,
    pub icon: String,
}

/// Mock weekly health outlook for an LGA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDto {
    pub lga: String,
    pub week_starting: String,
    pub predicted_risk: String,
    pub risk_level: String,
    pub confidence: String,
    pub summary: String,
    pub recommendation: String,
}
