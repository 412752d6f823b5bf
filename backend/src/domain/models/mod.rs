//! Domain models for the alerting pipeline.

pub mod delivery;
pub mod notification;
pub mod risk;
pub mod symptom;
pub mod user;

pub use delivery::{CallMethod, DeliveryLog, DeliveryOutcome};
pub use notification::{Notification, NotificationCategory};
pub use risk::{RiskAssessment, RiskLevel};
pub use symptom::SymptomReport;
pub use user::{Personality, User};
