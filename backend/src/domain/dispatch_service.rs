use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::composer;
use crate::domain::models::{
    CallMethod, DeliveryLog, DeliveryOutcome, Notification, NotificationCategory, RiskAssessment,
    RiskLevel, User,
};
use crate::providers::telephony::build_call_markup;
use crate::providers::{GenerationClient, SpeechSynthesizer, TelephonyClient};
use crate::storage::csv::{DeliveryLogRepository, NotificationRepository};
use crate::storage::traits::{DeliveryLogStorage, NotificationStorage};

/// Decides whether outreach is warranted and carries it out.
///
/// Ordering within one dispatch is enforced by data dependency: compose →
/// (best-effort) synthesize → durable log write → place call or hand the
/// script back for client-side simulation. Every provider along the way is
/// allowed to fail without failing the dispatch; only the log write is
/// load-bearing.
#[derive(Clone)]
pub struct DispatchService {
    delivery_repository: DeliveryLogRepository,
    notification_repository: NotificationRepository,
    generation: Option<Arc<dyn GenerationClient>>,
    speech: Option<SpeechSynthesizer>,
    telephony: Option<TelephonyClient>,
    /// Public base URL for webhook routes embedded in call markup
    public_base_url: String,
}

impl DispatchService {
    pub fn new(
        delivery_repository: DeliveryLogRepository,
        notification_repository: NotificationRepository,
        generation: Option<Arc<dyn GenerationClient>>,
        speech: Option<SpeechSynthesizer>,
        telephony: Option<TelephonyClient>,
        public_base_url: String,
    ) -> Self {
        Self {
            delivery_repository,
            notification_repository,
            generation,
            speech,
            telephony,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run one outreach decision for a user against a fresh assessment.
    ///
    /// Low risk without `force` is a no-op with zero side effects. Every
    /// other invocation writes exactly one new delivery log; callers wanting
    /// de-duplication must apply their own (the scheduler simply never
    /// forces).
    pub async fn dispatch(
        &self,
        user: &User,
        assessment: &RiskAssessment,
        force: bool,
    ) -> Result<DeliveryOutcome> {
        if assessment.level == RiskLevel::Low && !force {
            info!(
                "no outreach needed for user {} ({}: {:.1}mm)",
                user.id, assessment.lga, assessment.rainfall_mm
            );
            return Ok(DeliveryOutcome::NotNeeded {
                assessment: assessment.clone(),
            });
        }

        let script = composer::compose(
            self.generation.as_deref(),
            &user.name,
            &user.lga,
            &assessment.factors,
            user.personality,
        )
        .await;

        let audio_url = match &self.speech {
            Some(synth) => synth.synthesize(&script).await,
            None => None,
        };

        let log = DeliveryLog::new(&user.id, assessment.level, script, audio_url);
        self.delivery_repository.store_log(&log)?;

        self.push_alert_notification(user, assessment);

        if let Some(telephony) = &self.telephony {
            let markup = build_call_markup(
                &log.script,
                log.audio_url.as_deref(),
                &format!("{}/respond/{}", self.public_base_url, log.id),
            );
            let status_callback = format!("{}/call-status/{}", self.public_base_url, log.id);

            match telephony.place_call(&markup, &user.phone, &status_callback).await {
                Ok(call_sid) => {
                    return Ok(DeliveryOutcome::Initiated {
                        assessment: assessment.clone(),
                        log,
                        method: CallMethod::Telephony,
                        call_sid: Some(call_sid),
                    });
                }
                Err(e) => {
                    warn!("call placement failed, falling back to simulation: {e}");
                }
            }
        }

        Ok(DeliveryOutcome::Initiated {
            assessment: assessment.clone(),
            log,
            method: CallMethod::Simulation,
            call_sid: None,
        })
    }

    /// Best-effort feed entry; a storage hiccup here never fails the dispatch.
    fn push_alert_notification(&self, user: &User, assessment: &RiskAssessment) {
        let body = if assessment.factors.is_empty() {
            format!("Health check-in call for {}.", assessment.lga)
        } else {
            format!(
                "{} risk in {}: {}",
                assessment.level,
                assessment.lga,
                assessment.factors.join("; ")
            )
        };
        let notification =
            Notification::new(&user.id, "Health Alert", &body, NotificationCategory::Alert);
        if let Err(e) = self.notification_repository.store_notification(&notification) {
            warn!("failed to push alert notification for user {}: {e}", user.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Personality;
    use crate::providers::telephony::TelephonyConfig;
    use crate::providers::MockGenerationClient;
    use crate::storage::csv::CsvConnection;
    use chrono::Utc;
    use tempfile::tempdir;

    fn test_user() -> User {
        User {
            id: "user-1".to_string(),
            name: "Amina".to_string(),
            phone: "+2348012345678".to_string(),
            lga: "Kano".to_string(),
            personality: Personality::default(),
            registered_at: Utc::now(),
        }
    }

    fn high_assessment() -> RiskAssessment {
        RiskAssessment {
            lga: "Kano".to_string(),
            level: RiskLevel::High,
            rainfall_mm: 18.0,
            factors: vec!["Active Lassa fever outbreak in your area".to_string()],
        }
    }

    fn low_assessment() -> RiskAssessment {
        RiskAssessment {
            lga: "Ikeja".to_string(),
            level: RiskLevel::Low,
            rainfall_mm: 2.0,
            factors: vec![],
        }
    }

    struct Fixture {
        service: DispatchService,
        deliveries: DeliveryLogRepository,
        notifications: NotificationRepository,
    }

    fn setup(telephony: Option<TelephonyClient>, generation: Option<Arc<dyn GenerationClient>>) -> Fixture {
        let dir = tempdir().unwrap();
        let conn = CsvConnection::new(dir.path().to_path_buf()).unwrap();
        std::mem::forget(dir);

        let deliveries = DeliveryLogRepository::new(conn.clone());
        let notifications = NotificationRepository::new(conn);
        let service = DispatchService::new(
            deliveries.clone(),
            notifications.clone(),
            generation,
            None,
            telephony,
            "http://localhost:8000".to_string(),
        );
        Fixture {
            service,
            deliveries,
            notifications,
        }
    }

    fn dead_telephony() -> TelephonyClient {
        TelephonyClient::with_base_url(
            "http://127.0.0.1:1",
            TelephonyConfig {
                account_sid: "AC0".to_string(),
                auth_token: "t".to_string(),
                from_number: "+10000000000".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn low_risk_without_force_writes_nothing() {
        let fx = setup(None, None);
        let user = test_user();

        let outcome = fx.service.dispatch(&user, &low_assessment(), false).await.unwrap();

        assert!(matches!(outcome, DeliveryOutcome::NotNeeded { .. }));
        assert!(fx.deliveries.list_logs().unwrap().is_empty());
        assert!(fx.notifications.list_for_user(&user.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn low_risk_with_force_still_dispatches() {
        let fx = setup(None, None);
        let user = test_user();

        let outcome = fx.service.dispatch(&user, &low_assessment(), true).await.unwrap();

        match outcome {
            DeliveryOutcome::Initiated { method, log, .. } => {
                assert_eq!(method, CallMethod::Simulation);
                assert!(log.script.contains("Ikeja"));
            }
            other => panic!("expected an initiated outcome, got {other:?}"),
        }
        assert_eq!(fx.deliveries.list_logs().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn high_risk_without_telephony_simulates_and_logs() {
        let fx = setup(None, None);
        let user = test_user();

        let outcome = fx.service.dispatch(&user, &high_assessment(), false).await.unwrap();

        match outcome {
            DeliveryOutcome::Initiated { method, call_sid, log, .. } => {
                assert_eq!(method, CallMethod::Simulation);
                assert!(call_sid.is_none());
                assert_eq!(fx.deliveries.get_log(&log.id).unwrap().unwrap().script, log.script);
            }
            other => panic!("expected an initiated outcome, got {other:?}"),
        }

        let feed = fx.notifications.list_for_user(&user.id).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].category, NotificationCategory::Alert);
        assert!(feed[0].body.contains("Lassa fever"));
    }

    #[tokio::test]
    async fn telephony_failure_falls_back_to_simulation_with_same_script() {
        let fx = setup(Some(dead_telephony()), None);
        let user = test_user();

        let outcome = fx.service.dispatch(&user, &high_assessment(), false).await.unwrap();

        match outcome {
            DeliveryOutcome::Initiated { method, log, .. } => {
                assert_eq!(method, CallMethod::Simulation);
                // The logged script is exactly what the failed call carried.
                let stored = fx.deliveries.get_log(&log.id).unwrap().unwrap();
                assert_eq!(stored.script, log.script);
            }
            other => panic!("expected an initiated outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generated_script_is_used_when_the_provider_succeeds() {
        let generation: Arc<dyn GenerationClient> =
            Arc::new(MockGenerationClient::replying("Amina, rain don plenty for Kano o."));
        let fx = setup(None, Some(generation));
        let user = test_user();

        let outcome = fx.service.dispatch(&user, &high_assessment(), false).await.unwrap();

        match outcome {
            DeliveryOutcome::Initiated { log, .. } => {
                assert_eq!(log.script, "Amina, rain don plenty for Kano o.");
            }
            other => panic!("expected an initiated outcome, got {other:?}"),
        }
    }
}
