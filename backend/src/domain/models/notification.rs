use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// In-app feed item, independent of delivery logs. Append-only; the read
/// flag flips once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
    pub read: bool,
}

impl Notification {
    pub fn new(user_id: &str, title: &str, body: &str, category: NotificationCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            title: title.to_string(),
            body: body.to_string(),
            category,
            read: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Rain,
    Prediction,
    Tip,
    Alert,
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationCategory::Rain => write!(f, "rain"),
            NotificationCategory::Prediction => write!(f, "prediction"),
            NotificationCategory::Tip => write!(f, "tip"),
            NotificationCategory::Alert => write!(f, "alert"),
        }
    }
}

impl NotificationCategory {
    /// Parse a stored category; anything unrecognized reads as `Alert`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "rain" => NotificationCategory::Rain,
            "prediction" => NotificationCategory::Prediction,
            "tip" => NotificationCategory::Tip,
            _ => NotificationCategory::Alert,
        }
    }
}
