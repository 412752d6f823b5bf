//! Periodic risk checks.
//!
//! Every hour, every registered user gets a fresh assessment and a dispatch
//! without force, so low-risk users are skipped inside the dispatcher and
//! never generate outreach. Fan-out is one task per user with no added
//! bound; the collaborators' own limits are the only throttle.

use log::{error, info, warn};
use std::time::Duration;

use crate::domain::models::{DeliveryOutcome, User};
use crate::AppState;

const CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawn the hourly check loop. Runs for the lifetime of the process.
pub fn spawn_hourly_checks(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CHECK_INTERVAL);
        // The first tick completes immediately; consume it so the initial
        // sweep happens one full interval after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            run_sweep(&state).await;
        }
    });
}

async fn run_sweep(state: &AppState) {
    let users = match state.users.list_users() {
        Ok(users) => users,
        Err(e) => {
            error!("scheduled sweep could not list users: {e}");
            return;
        }
    };

    info!("scheduled sweep starting for {} users", users.len());
    for user in users {
        let state = state.clone();
        tokio::spawn(async move {
            check_user(state, user).await;
        });
    }
}

async fn check_user(state: AppState, user: User) {
    let assessment = state.risk.assess(&user.lga).await;
    match state.dispatch.dispatch(&user, &assessment, false).await {
        Ok(DeliveryOutcome::NotNeeded { .. }) => {
            info!("scheduled check for user {}: no outreach needed", user.id);
        }
        Ok(DeliveryOutcome::Initiated { log, .. }) => {
            info!(
                "scheduled check for user {}: outreach initiated (log {})",
                user.id, log.id
            );
        }
        Err(e) => {
            warn!("scheduled dispatch failed for user {}: {e}", user.id);
        }
    }
}
