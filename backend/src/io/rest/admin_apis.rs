//! # REST API for Administration
//!
//! The mock-rain switch: the only cross-request mutable state besides the
//! store. Toggling takes effect on the very next weather call system-wide.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{info, warn};

use shared::{MockRainRequest, MockRainState};

use crate::domain::models::NotificationCategory;
use crate::AppState;

/// Read the current override state
pub async fn get_mock_rain(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MockRainState {
            enabled: state.mock_rain.enabled(),
        }),
    )
}

/// Toggle the override. Pushing the feed notification is best-effort: its
/// failure never affects the toggle itself.
pub async fn set_mock_rain(
    State(state): State<AppState>,
    Json(request): Json<MockRainRequest>,
) -> impl IntoResponse {
    info!("POST /mock-rain - enabled: {}", request.enabled);
    state.mock_rain.set(request.enabled);

    if let Some(user_id) = &request.user_id {
        let (title, body) = if request.enabled {
            ("Mock Rain Enabled", "Environmental risks are now simulated.")
        } else {
            ("Mock Rain Disabled", "Real-time weather restored.")
        };
        if let Err(e) = state
            .notifications
            .push(user_id, title, body, NotificationCategory::Rain)
        {
            warn!("Failed to push mock-rain notification: {}", e);
        }
    }

    (
        StatusCode::OK,
        Json(MockRainState {
            enabled: state.mock_rain.enabled(),
        }),
    )
}
