//! # REST API for Risk Checks
//!
//! Fresh risk assessments; nothing here is cached.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::mappers;
use crate::AppState;

/// Fresh risk assessment for a user's LGA
pub async fn risk_check(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /risk-check/{}", user_id);

    let user = match state.users.get_user(&user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            error!("Failed to load user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading user").into_response();
        }
    };

    let assessment = state.risk.assess(&user.lga).await;
    (
        StatusCode::OK,
        Json(mappers::assessment_to_risk_check(&user_id, &assessment)),
    )
        .into_response()
}
