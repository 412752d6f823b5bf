//! # REST API for Users
//!
//! Registration, listing, personality updates and the dashboard aggregate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use shared::{MeResponse, RegisterUserRequest, UpdatePersonalityRequest};

use crate::io::rest::mappers;
use crate::storage::traits::DeliveryLogStorage;
use crate::AppState;

/// Register a new user
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> impl IntoResponse {
    info!("POST /register - lga: {}", request.lga);

    match state.users.register(
        &request.name,
        &request.phone,
        &request.lga,
        request.personality.as_deref(),
    ) {
        Ok(user) => (StatusCode::CREATED, Json(mappers::user_to_dto(&user))).into_response(),
        Err(e) => {
            error!("Failed to register user: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /users");

    match state.users.list_users() {
        Ok(users) => {
            let dtos: Vec<_> = users.iter().map(mappers::user_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing users").into_response()
        }
    }
}

/// Change a user's message personality
pub async fn update_personality(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdatePersonalityRequest>,
) -> impl IntoResponse {
    info!("PUT /users/{}/personality", user_id);

    match state.users.update_personality(&user_id, &request.personality) {
        Ok(user) => (StatusCode::OK, Json(mappers::user_to_dto(&user))).into_response(),
        Err(e) => {
            error!("Failed to update personality: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Dashboard aggregate: user, recent logs and symptoms, health score,
/// current risk
pub async fn get_me(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /me/{}", user_id);

    let user = match state.users.get_user(&user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            error!("Failed to load user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading user").into_response();
        }
    };

    let assessment = state.risk.assess(&user.lga).await;

    let logs = match state.deliveries.list_logs_for_user(&user.id) {
        Ok(logs) => logs,
        Err(e) => {
            error!("Failed to load delivery logs: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading logs").into_response();
        }
    };
    let symptoms = match state.symptoms.list_reports(&user.id) {
        Ok(reports) => reports,
        Err(e) => {
            error!("Failed to load symptom reports: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading symptoms").into_response();
        }
    };
    let health_score = match state.symptoms.score_for_user(&user.id, assessment.level) {
        Ok(score) => score,
        Err(e) => {
            error!("Failed to compute health score: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error computing score").into_response();
        }
    };

    let response = MeResponse {
        user: mappers::user_to_dto(&user),
        logs: logs.iter().map(mappers::log_to_dto).collect(),
        symptoms: symptoms.iter().map(mappers::symptom_to_dto).collect(),
        health_score,
        current_risk: assessment.level.to_string(),
        rainfall_mm: assessment.rainfall_mm,
    };
    (StatusCode::OK, Json(response)).into_response()
}
