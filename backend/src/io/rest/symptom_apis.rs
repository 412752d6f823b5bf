//! # REST API for Symptom Reports

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use shared::SymptomRequest;

use crate::domain::NewSymptomReport;
use crate::io::rest::mappers;
use crate::AppState;

/// Append a symptom report for a user
pub async fn log_symptoms(
    State(state): State<AppState>,
    Json(request): Json<SymptomRequest>,
) -> impl IntoResponse {
    info!("POST /symptoms - user: {}", request.user_id);

    let new = NewSymptomReport {
        fever: request.fever,
        cough: request.cough,
        headache: request.headache,
        fatigue: request.fatigue,
        diarrhea: request.diarrhea,
        vomiting: request.vomiting,
        notes: request.notes,
        lat: request.lat,
        lon: request.lon,
    };

    match state.symptoms.log_report(&request.user_id, new) {
        Ok(report) => (StatusCode::CREATED, Json(mappers::symptom_to_dto(&report))).into_response(),
        Err(e) => {
            error!("Failed to log symptoms: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// List one user's symptom reports, most recent first
pub async fn list_symptoms(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /symptoms/{}", user_id);

    match state.symptoms.list_reports(&user_id) {
        Ok(reports) => {
            let dtos: Vec<_> = reports.iter().map(mappers::symptom_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list symptom reports: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing reports").into_response()
        }
    }
}
