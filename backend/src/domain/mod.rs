//! Domain layer: the risk evaluation and escalation pipeline plus the
//! services around it.
//!
//! Pure pieces (geo, hotspots, risk, facilities, composer prompt/fallback,
//! tips) are free functions over static data; stateful pieces are services
//! holding repositories and provider clients.

pub mod composer;
pub mod dispatch_service;
pub mod facilities;
pub mod geo;
pub mod hotspots;
pub mod models;
pub mod notification_service;
pub mod prediction;
pub mod response_service;
pub mod risk;
pub mod risk_service;
pub mod symptom_service;
pub mod tips;
pub mod user_service;

pub use dispatch_service::DispatchService;
pub use notification_service::NotificationService;
pub use response_service::{RespondOutcome, ResponseError, ResponseService};
pub use risk_service::RiskService;
pub use symptom_service::{NewSymptomReport, SymptomService};
pub use user_service::UserService;
