//! # REST API Interface Layer
//!
//! HTTP endpoints for the alerting service. This layer handles request and
//! response serialization, error translation from domain errors to status
//! codes, and request logging. Business logic stays in the domain layer; the
//! one wrinkle here is the response webhook, which must answer voice callers
//! with call markup instead of HTTP errors.

pub mod admin_apis;
pub mod call_apis;
pub mod content_apis;
pub mod mappers;
pub mod notification_apis;
pub mod risk_apis;
pub mod symptom_apis;
pub mod user_apis;
