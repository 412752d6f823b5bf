//! # REST API for Calls
//!
//! Dispatch trigger, delivery log listings, the response webhook (JSON from
//! simulation clients, form-encoded digits from the telephony provider) and
//! the call status callback.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use log::{error, info, warn};
use serde::Deserialize;

use shared::{CallOutcomeDto, RespondPayload, RespondResult};

use crate::domain::models::DeliveryOutcome;
use crate::domain::ResponseError;
use crate::io::rest::mappers;
use crate::storage::traits::DeliveryLogStorage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CallQuery {
    force: Option<bool>,
}

/// Run the dispatch pipeline for one user
pub async fn call_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<CallQuery>,
) -> impl IntoResponse {
    let force = query.force.unwrap_or(false);
    info!("PUT /call-user/{} (force: {})", user_id, force);

    let user = match state.users.get_user(&user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            error!("Failed to load user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading user").into_response();
        }
    };

    let assessment = state.risk.assess(&user.lga).await;

    match state.dispatch.dispatch(&user, &assessment, force).await {
        Ok(DeliveryOutcome::NotNeeded { assessment }) => {
            let dto = CallOutcomeDto {
                status: "ok".to_string(),
                risk: assessment.level.to_string(),
                rainfall_mm: assessment.rainfall_mm,
                message: Some(format!(
                    "No significant risk detected for {} (rainfall: {:.1}mm).",
                    assessment.lga, assessment.rainfall_mm
                )),
                method: None,
                call_id: None,
                call_sid: None,
                script: None,
                audio_url: None,
            };
            (StatusCode::OK, Json(dto)).into_response()
        }
        Ok(DeliveryOutcome::Initiated {
            assessment,
            log,
            method,
            call_sid,
        }) => {
            let dto = CallOutcomeDto {
                status: "call_initiated".to_string(),
                risk: assessment.level.to_string(),
                rainfall_mm: assessment.rainfall_mm,
                message: None,
                method: Some(mappers::call_method_to_dto(method)),
                call_id: Some(log.id.clone()),
                call_sid,
                script: Some(log.script.clone()),
                audio_url: log.audio_url.clone(),
            };
            (StatusCode::OK, Json(dto)).into_response()
        }
        Err(e) => {
            error!("Dispatch failed for user {}: {}", user_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Dispatch failed").into_response()
        }
    }
}

/// List all delivery logs, most recent first
pub async fn list_logs(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /logs");

    match state.deliveries.list_logs() {
        Ok(logs) => {
            let dtos: Vec<_> = logs.iter().map(mappers::log_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list logs: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing logs").into_response()
        }
    }
}

/// List one user's delivery logs, most recent first
pub async fn list_logs_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /logs/{}", user_id);

    match state.deliveries.list_logs_for_user(&user_id) {
        Ok(logs) => {
            let dtos: Vec<_> = logs.iter().map(mappers::log_to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => {
            error!("Failed to list logs: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing logs").into_response()
        }
    }
}

/// Response webhook for one delivery log.
///
/// Simulation clients POST JSON; the telephony provider POSTs form-encoded
/// digits and must always get call markup back, never an HTTP failure.
pub async fn respond(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        info!("POST /respond/{} (json)", log_id);
        let payload: RespondPayload = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Malformed respond payload: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed response payload").into_response();
            }
        };
        match state
            .responses
            .record_json(&log_id, &payload.response, payload.lat, payload.lon)
        {
            Ok(outcome) => {
                let status = if outcome.recorded { "ok" } else { "ignored" };
                let result = RespondResult {
                    status: status.to_string(),
                    message: outcome.message,
                    facility: outcome.facility.map(mappers::facility_to_dto),
                };
                (StatusCode::OK, Json(result)).into_response()
            }
            Err(ResponseError::LogNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Call log not found").into_response()
            }
            Err(ResponseError::Storage(e)) => {
                error!("Failed to record response: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error recording response").into_response()
            }
        }
    } else {
        info!("POST /respond/{} (voice)", log_id);
        let digits = form_value(&body, "Digits");
        match state.responses.record_digits(&log_id, digits.as_deref()) {
            Ok(markup) => xml_response(markup),
            Err(e) => {
                error!("Failed to record voice response: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error recording response").into_response()
            }
        }
    }
}

/// Telephony status callback; acknowledged and logged, no state change
pub async fn call_status(Path(log_id): Path<String>, body: String) -> impl IntoResponse {
    let status = form_value(&body, "CallStatus").unwrap_or_else(|| "unknown".to_string());
    info!("Call {} status: {}", log_id, status);
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

fn xml_response(markup: String) -> Response {
    ([(header::CONTENT_TYPE, "text/xml")], markup).into_response()
}

/// Minimal form-body field extraction; enough for the provider's
/// `Digits=1`-style payloads.
fn form_value(body: &str, key: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| urldecode(v))
    })
}

fn urldecode(value: &str) -> String {
    let mut decoded = Vec::with_capacity(value.len());
    let mut bytes = value.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'+' => decoded.push(b' '),
            b'%' => match (bytes.next(), bytes.next()) {
                (Some(hi), Some(lo)) => {
                    let hex = [hi, lo];
                    match u8::from_str_radix(std::str::from_utf8(&hex).unwrap_or(""), 16) {
                        Ok(byte) => decoded.push(byte),
                        Err(_) => {
                            decoded.push(b'%');
                            decoded.extend_from_slice(&hex);
                        }
                    }
                }
                _ => decoded.push(b'%'),
            },
            other => decoded.push(other),
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_value_finds_the_digits_field() {
        assert_eq!(
            form_value("Digits=1&CallSid=CA123", "Digits").as_deref(),
            Some("1")
        );
        assert_eq!(
            form_value("CallSid=CA123&Digits=2", "Digits").as_deref(),
            Some("2")
        );
        assert_eq!(form_value("CallSid=CA123", "Digits"), None);
        assert_eq!(form_value("", "Digits"), None);
    }

    #[test]
    fn urldecode_handles_plus_and_percent_escapes() {
        assert_eq!(urldecode("in+progress"), "in progress");
        assert_eq!(urldecode("a%26b"), "a&b");
        assert_eq!(urldecode("plain"), "plain");
        // Broken escapes pass through rather than panicking.
        assert_eq!(urldecode("50%"), "50%");
    }
}
