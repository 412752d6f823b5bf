//! # REST API for Tips, Predictions and Facility Lookups

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use shared::FacilityLookupResponse;

use crate::domain::facilities::{self, GENERIC_RECOMMENDATION};
use crate::domain::{prediction, tips};
use crate::io::rest::mappers;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    category: Option<String>,
}

/// A random tip, or every tip in a category when one is given
pub async fn get_tips(Query(query): Query<TipsQuery>) -> impl IntoResponse {
    match query.category {
        Some(category) => {
            info!("GET /tips?category={}", category);
            let dtos: Vec<_> = tips::tips_by_category(&category)
                .into_iter()
                .map(mappers::tip_to_dto)
                .collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        None => {
            info!("GET /tips");
            (StatusCode::OK, Json(mappers::tip_to_dto(tips::random_tip()))).into_response()
        }
    }
}

/// Mock weekly outlook for a user's LGA
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /predictions/{}", user_id);

    let user = match state.users.get_user(&user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return (StatusCode::NOT_FOUND, "User not found").into_response(),
        Err(e) => {
            error!("Failed to load user: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading user").into_response();
        }
    };

    let assessment = state.risk.assess(&user.lga).await;
    let prediction = prediction::generate_weekly(&user.lga, assessment.rainfall_mm);
    (StatusCode::OK, Json(mappers::prediction_to_dto(&prediction))).into_response()
}

/// Default referral facility for an LGA, or the generic recommendation
pub async fn get_facility(Path(lga): Path<String>) -> impl IntoResponse {
    info!("GET /facilities/{}", lga);

    let response = match facilities::default_for_lga(&lga) {
        Some(facility) => FacilityLookupResponse {
            facility: Some(mappers::facility_to_dto(facility)),
            recommendation: None,
        },
        None => FacilityLookupResponse {
            facility: None,
            recommendation: Some(GENERIC_RECOMMENDATION.to_string()),
        },
    };
    (StatusCode::OK, Json(response))
}
