//! # Sabi Health Backend
//!
//! Health-risk alerting service: registers users by LGA, evaluates
//! environmental risk (rainfall + disease hotspots), generates personalized
//! voice warnings, delivers them via telephony or client-side simulation,
//! and routes symptomatic responses to nearby health facilities.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, webhooks)
//!     ↓
//! Domain Layer (risk pipeline, services)
//!     ↓
//! Storage Layer (file repositories)  +  Providers (weather, generation,
//!                                       speech, telephony)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod providers;
pub mod scheduler;
pub mod storage;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ServiceConfig;
use crate::domain::{
    DispatchService, NotificationService, ResponseService, RiskService, SymptomService,
    UserService,
};
use crate::providers::{
    GenerationClient, GeminiClient, MockRainSwitch, SpeechSynthesizer, TelephonyClient,
    WeatherGauge,
};
use crate::storage::csv::{
    CsvConnection, DeliveryLogRepository, NotificationRepository, UserRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub risk: RiskService,
    pub dispatch: DispatchService,
    pub responses: ResponseService,
    pub symptoms: SymptomService,
    pub notifications: NotificationService,
    pub deliveries: DeliveryLogRepository,
    pub mock_rain: MockRainSwitch,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &ServiceConfig) -> Result<AppState> {
    info!("Setting up storage at {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;

    info!("Setting up providers");
    let mock_rain = MockRainSwitch::new();
    let weather = WeatherGauge::new(mock_rain.clone());

    let generation: Option<Arc<dyn GenerationClient>> = match &config.generation_api_key {
        Some(key) => {
            info!("Generation provider configured");
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            info!("No generation API key - using fallback messages");
            None
        }
    };

    let speech = config.speech_api_key.as_ref().map(|key| {
        info!("Speech synthesis configured");
        SpeechSynthesizer::new(key.clone(), connection.audio_directory(), config.domain.clone())
    });

    let telephony = match &config.telephony {
        Some(telephony_config) => {
            info!("Telephony client configured");
            Some(TelephonyClient::new(telephony_config.clone()))
        }
        None => {
            info!("Telephony credentials missing - simulation only");
            None
        }
    };

    info!("Setting up domain services");
    let deliveries = DeliveryLogRepository::new(connection.clone());
    let notifications = NotificationService::new(connection.clone());
    let dispatch = DispatchService::new(
        deliveries.clone(),
        NotificationRepository::new(connection.clone()),
        generation,
        speech,
        telephony,
        config.domain.clone(),
    );
    let responses = ResponseService::new(deliveries.clone(), UserRepository::new(connection.clone()));

    Ok(AppState {
        users: UserService::new(connection.clone()),
        risk: RiskService::new(weather),
        dispatch,
        responses,
        symptoms: SymptomService::new(connection.clone()),
        notifications,
        deliveries,
        mock_rain,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServiceConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    use crate::io::rest::{
        admin_apis, call_apis, content_apis, notification_apis, risk_apis, symptom_apis,
        user_apis,
    };

    Router::new()
        .route("/", get(root))
        .route("/register", post(user_apis::register_user))
        .route("/users", get(user_apis::list_users))
        .route(
            "/users/:user_id/personality",
            put(user_apis::update_personality),
        )
        .route("/me/:user_id", get(user_apis::get_me))
        .route("/risk-check/:user_id", get(risk_apis::risk_check))
        .route("/call-user/:user_id", put(call_apis::call_user))
        .route("/respond/:log_id", post(call_apis::respond))
        .route("/call-status/:log_id", post(call_apis::call_status))
        .route("/logs", get(call_apis::list_logs))
        .route("/logs/:user_id", get(call_apis::list_logs_for_user))
        .route("/symptoms", post(symptom_apis::log_symptoms))
        .route("/symptoms/:user_id", get(symptom_apis::list_symptoms))
        .route(
            "/notifications/:user_id",
            get(notification_apis::list_notifications),
        )
        .route(
            "/notifications/:user_id/:notification_id/read",
            post(notification_apis::mark_notification_read),
        )
        .route(
            "/mock-rain",
            get(admin_apis::get_mock_rain).post(admin_apis::set_mock_rain),
        )
        .route("/tips", get(content_apis::get_tips))
        .route("/predictions/:user_id", get(content_apis::get_prediction))
        .route("/facilities/:lga", get(content_apis::get_facility))
        .nest_service("/audio", ServeDir::new(config.data_dir.join("audio")))
        .layer(cors)
        .with_state(app_state)
}

async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "message": "Sabi Health API is running" }))
}
