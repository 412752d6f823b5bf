use anyhow::Result;
use log::{info, warn};

use crate::domain::facilities::{self, HealthFacility, GENERIC_RECOMMENDATION};
use crate::domain::geo::Coordinates;
use crate::storage::csv::{DeliveryLogRepository, UserRepository};
use crate::storage::traits::{DeliveryLogStorage, UserStorage};

use crate::providers::telephony::build_spoken_reply;

/// Recorded answer values. Anything else is treated as "no valid response".
const RESPONSE_SYMPTOMATIC: &str = "fever";
const RESPONSE_FINE: &str = "fine";

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// Terminal for programmatic callers; voice callers get graceful markup
    /// instead of ever seeing this.
    #[error("delivery log not found: {0}")]
    LogNotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Outcome of recording a JSON (simulation client) response.
#[derive(Debug, Clone, PartialEq)]
pub struct RespondOutcome {
    /// False when the payload carried no recognizable response
    pub recorded: bool,
    pub message: String,
    pub facility: Option<&'static HealthFacility>,
}

/// Records recipients' self-reported status and resolves escalations.
#[derive(Clone)]
pub struct ResponseService {
    delivery_repository: DeliveryLogRepository,
    user_repository: UserRepository,
}

impl ResponseService {
    pub fn new(delivery_repository: DeliveryLogRepository, user_repository: UserRepository) -> Self {
        Self {
            delivery_repository,
            user_repository,
        }
    }

    /// Handle a structured JSON response from a simulation client.
    pub fn record_json(
        &self,
        log_id: &str,
        response: &str,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<RespondOutcome, ResponseError> {
        let log = self
            .delivery_repository
            .get_log(log_id)?
            .ok_or_else(|| ResponseError::LogNotFound(log_id.to_string()))?;

        match response.trim().to_lowercase().as_str() {
            RESPONSE_SYMPTOMATIC => {
                self.delivery_repository
                    .update_response(log_id, RESPONSE_SYMPTOMATIC)?;
                info!("symptomatic response recorded for log {log_id}, escalating");

                let facility = self.resolve_facility(&log.user_id, lat, lon)?;
                let message = match facility {
                    Some(f) => format!(
                        "Please visit {}, {} immediately for a check-up. Stay safe.",
                        f.name, f.address
                    ),
                    None => GENERIC_RECOMMENDATION.to_string(),
                };
                Ok(RespondOutcome {
                    recorded: true,
                    message,
                    facility,
                })
            }
            RESPONSE_FINE => {
                self.delivery_repository
                    .update_response(log_id, RESPONSE_FINE)?;
                Ok(RespondOutcome {
                    recorded: true,
                    message: "Thank you. Stay safe and follow preventive measures.".to_string(),
                    facility: None,
                })
            }
            other => {
                warn!("unrecognized response '{other}' for log {log_id}, record left untouched");
                Ok(RespondOutcome {
                    recorded: false,
                    message: "No valid response received.".to_string(),
                    facility: None,
                })
            }
        }
    }

    /// Handle a form-encoded digit response from the telephony webhook.
    ///
    /// Always returns call markup: a missing log or an unexpected digit must
    /// close the call gracefully, never error. Only a storage failure
    /// propagates.
    pub fn record_digits(&self, log_id: &str, digits: Option<&str>) -> Result<String> {
        let Some(log) = self.delivery_repository.get_log(log_id)? else {
            return Ok(build_spoken_reply(
                "Sorry, we couldn't find your call record.",
            ));
        };

        match digits {
            Some("1") => {
                self.delivery_repository
                    .update_response(log_id, RESPONSE_SYMPTOMATIC)?;
                info!("symptomatic digit received for log {log_id}, escalating");

                let message = match self.resolve_facility(&log.user_id, None, None)? {
                    Some(f) => format!(
                        "Please visit {}, {} immediately for a check-up. Stay safe.",
                        f.name, f.address
                    ),
                    None => GENERIC_RECOMMENDATION.to_string(),
                };
                Ok(build_spoken_reply(&message))
            }
            Some("2") => {
                self.delivery_repository
                    .update_response(log_id, RESPONSE_FINE)?;
                Ok(build_spoken_reply(
                    "Thank you. Stay safe and follow preventive measures.",
                ))
            }
            _ => Ok(build_spoken_reply(
                "We didn't receive a valid response. Goodbye.",
            )),
        }
    }

    /// Precise coordinates win, then the user's per-LGA default, then none
    /// (the caller falls back to the generic recommendation).
    fn resolve_facility(
        &self,
        user_id: &str,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<Option<&'static HealthFacility>> {
        if let (Some(lat), Some(lon)) = (lat, lon) {
            return Ok(facilities::nearest(Coordinates { lat, lon }));
        }

        match self.user_repository.get_user(user_id)? {
            Some(user) => Ok(facilities::default_for_lga(&user.lga)),
            None => {
                warn!("delivery log references unknown user {user_id}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DeliveryLog, Personality, RiskLevel, User};
    use crate::storage::csv::CsvConnection;
    use chrono::Utc;
    use tempfile::tempdir;

    struct Fixture {
        service: ResponseService,
        deliveries: DeliveryLogRepository,
        users: UserRepository,
    }

    fn setup() -> Fixture {
        let dir = tempdir().unwrap();
        let conn = CsvConnection::new(dir.path().to_path_buf()).unwrap();
        std::mem::forget(dir);

        let deliveries = DeliveryLogRepository::new(conn.clone());
        let users = UserRepository::new(conn);
        let service = ResponseService::new(deliveries.clone(), users.clone());
        Fixture {
            service,
            deliveries,
            users,
        }
    }

    fn seed_user_and_log(fx: &Fixture, lga: &str) -> DeliveryLog {
        let user = User {
            id: "user-1".to_string(),
            name: "Amina".to_string(),
            phone: "+2348012345678".to_string(),
            lga: lga.to_string(),
            personality: Personality::default(),
            registered_at: Utc::now(),
        };
        fx.users.store_user(&user).unwrap();

        let log = DeliveryLog::new(&user.id, RiskLevel::High, "stay safe".to_string(), None);
        fx.deliveries.store_log(&log).unwrap();
        log
    }

    #[test]
    fn missing_log_is_not_found_for_json_callers() {
        let fx = setup();
        let result = fx.service.record_json("missing", "fever", None, None);
        assert!(matches!(result, Err(ResponseError::LogNotFound(_))));
    }

    #[test]
    fn missing_log_is_graceful_markup_for_voice_callers() {
        let fx = setup();
        let markup = fx.service.record_digits("missing", Some("1")).unwrap();
        assert!(markup.contains("couldn't find your call record"));
        assert!(markup.contains("<Hangup/>"));
    }

    #[test]
    fn fever_with_coordinates_resolves_nearest_facility() {
        let fx = setup();
        // User lives in Kano, but the precise position is central Lagos; the
        // supplied coordinates must win over the LGA default.
        let log = seed_user_and_log(&fx, "Kano");

        let outcome = fx
            .service
            .record_json(&log.id, "fever", Some(6.455), Some(3.39))
            .unwrap();

        assert!(outcome.recorded);
        let facility = outcome.facility.unwrap();
        assert_eq!(facility.name, "Lagos Island General Hospital");
        assert!(outcome.message.contains("Lagos Island General Hospital"));
        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fever")
        );
    }

    #[test]
    fn fever_without_coordinates_uses_the_lga_default() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let outcome = fx.service.record_json(&log.id, "fever", None, None).unwrap();

        assert_eq!(outcome.facility.unwrap().name, "Kano General Hospital");
    }

    #[test]
    fn fever_with_unknown_lga_falls_back_to_generic_advice() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Nowhere Particular");

        let outcome = fx.service.record_json(&log.id, "fever", None, None).unwrap();

        assert!(outcome.facility.is_none());
        assert_eq!(outcome.message, GENERIC_RECOMMENDATION);
        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fever")
        );
    }

    #[test]
    fn fine_records_without_escalation() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let outcome = fx.service.record_json(&log.id, "fine", None, None).unwrap();

        assert!(outcome.recorded);
        assert!(outcome.facility.is_none());
        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fine")
        );
    }

    #[test]
    fn unrecognized_json_response_leaves_the_record_untouched() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let outcome = fx.service.record_json(&log.id, "maybe", None, None).unwrap();

        assert!(!outcome.recorded);
        assert!(fx.deliveries.get_log(&log.id).unwrap().unwrap().response.is_none());
    }

    #[test]
    fn second_response_overwrites_the_first() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        fx.service.record_json(&log.id, "fever", None, None).unwrap();
        fx.service.record_json(&log.id, "fine", None, None).unwrap();

        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fine")
        );
    }

    #[test]
    fn digit_one_escalates_and_speaks_the_referral() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let markup = fx.service.record_digits(&log.id, Some("1")).unwrap();

        assert!(markup.contains("Kano General Hospital"));
        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fever")
        );
    }

    #[test]
    fn digit_two_thanks_the_caller() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let markup = fx.service.record_digits(&log.id, Some("2")).unwrap();

        assert!(markup.contains("Thank you"));
        assert_eq!(
            fx.deliveries.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fine")
        );
    }

    #[test]
    fn unexpected_digit_closes_gracefully_without_mutating() {
        let fx = setup();
        let log = seed_user_and_log(&fx, "Kano");

        let markup = fx.service.record_digits(&log.id, Some("7")).unwrap();
        assert!(markup.contains("didn't receive a valid response"));

        let markup = fx.service.record_digits(&log.id, None).unwrap();
        assert!(markup.contains("didn't receive a valid response"));

        assert!(fx.deliveries.get_log(&log.id).unwrap().unwrap().response.is_none());
    }
}
