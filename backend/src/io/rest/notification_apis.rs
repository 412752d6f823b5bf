//! # REST API for the Notification Feed

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::mappers;
use crate::AppState;

/// List one user's notifications, most recent first
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /notifications/{}", user_id);

    match state.notifications.list(&user_id) {
        Ok(notifications) => {
            let dtos: Vec<_> = notifications.iter().map(mappers::notification_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list notifications: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing notifications").into_response()
        }
    }
}

/// Flip a notification's read flag
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path((user_id, notification_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("POST /notifications/{}/{}/read", user_id, notification_id);

    match state.notifications.mark_read(&user_id, &notification_id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Notification not found").into_response(),
        Err(e) => {
            error!("Failed to mark notification read: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating notification").into_response()
        }
    }
}
