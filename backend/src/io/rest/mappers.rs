//! Domain → DTO translation. Pure mapping, no business logic.

use shared::{
    DeliveryLogDto, DeliveryMethod, FacilityDto, NotificationDto, PredictionDto,
    RiskCheckResponse, SymptomReportDto, TipDto, UserDto,
};

use crate::domain::facilities::HealthFacility;
use crate::domain::models::{
    CallMethod, DeliveryLog, Notification, RiskAssessment, SymptomReport, User,
};
use crate::domain::prediction::WeeklyPrediction;
use crate::domain::tips::Tip;

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id.clone(),
        name: user.name.clone(),
        phone: user.phone.clone(),
        lga: user.lga.clone(),
        personality: user.personality.key().to_string(),
        registered_at: user.registered_at.to_rfc3339(),
    }
}

pub fn log_to_dto(log: &DeliveryLog) -> DeliveryLogDto {
    DeliveryLogDto {
        id: log.id.clone(),
        user_id: log.user_id.clone(),
        timestamp: log.timestamp.to_rfc3339(),
        risk_level: log.risk_level.to_string(),
        script: log.script.clone(),
        audio_url: log.audio_url.clone(),
        response: log.response.clone(),
    }
}

pub fn symptom_to_dto(report: &SymptomReport) -> SymptomReportDto {
    SymptomReportDto {
        id: report.id.clone(),
        user_id: report.user_id.clone(),
        timestamp: report.timestamp.to_rfc3339(),
        fever: report.fever,
        cough: report.cough,
        headache: report.headache,
        fatigue: report.fatigue,
        diarrhea: report.diarrhea,
        vomiting: report.vomiting,
        notes: report.notes.clone(),
        lat: report.lat,
        lon: report.lon,
    }
}

pub fn notification_to_dto(notification: &Notification) -> NotificationDto {
    NotificationDto {
        id: notification.id.clone(),
        user_id: notification.user_id.clone(),
        timestamp: notification.timestamp.to_rfc3339(),
        title: notification.title.clone(),
        body: notification.body.clone(),
        category: notification.category.to_string(),
        read: notification.read,
    }
}

pub fn facility_to_dto(facility: &HealthFacility) -> FacilityDto {
    FacilityDto {
        name: facility.name.to_string(),
        address: facility.address.to_string(),
        lga: facility.lga.to_string(),
    }
}

pub fn assessment_to_risk_check(user_id: &str, assessment: &RiskAssessment) -> RiskCheckResponse {
    RiskCheckResponse {
        user_id: user_id.to_string(),
        lga: assessment.lga.clone(),
        risk: assessment.level.to_string(),
        rainfall_mm: assessment.rainfall_mm,
        factors: assessment.factors.clone(),
    }
}

pub fn call_method_to_dto(method: CallMethod) -> DeliveryMethod {
    match method {
        CallMethod::Telephony => DeliveryMethod::Twilio,
        CallMethod::Simulation => DeliveryMethod::Simulation,
    }
}

pub fn tip_to_dto(tip: &Tip) -> TipDto {
    TipDto {
        category: tip.category.to_string(),
        title: tip.title.to_string(),
        content: tip.content.to_string(),
        icon: tip.icon.to_string(),
    }
}

pub fn prediction_to_dto(prediction: &WeeklyPrediction) -> PredictionDto {
    PredictionDto {
        lga: prediction.lga.clone(),
        week_starting: prediction.week_starting.clone(),
        predicted_risk: prediction.predicted_risk.clone(),
        risk_level: prediction.risk_level.clone(),
        confidence: prediction.confidence.clone(),
        summary: prediction.summary.clone(),
        recommendation: prediction.recommendation.clone(),
    }
}
