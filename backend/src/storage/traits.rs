//! # Storage Traits
//!
//! Storage abstraction for the alerting service. The domain layer works
//! against these traits so the file-based backend can be swapped without
//! touching business logic.

use anyhow::Result;

use crate::domain::models::{DeliveryLog, Notification, SymptomReport, User};

/// Interface for user storage operations.
pub trait UserStorage: Send + Sync {
    /// Store a newly registered user
    fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a user by ID
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Find a user by phone number (the registration uniqueness key)
    fn find_by_phone(&self, phone: &str) -> Result<Option<User>>;

    /// List all users ordered by name
    fn list_users(&self) -> Result<Vec<User>>;

    /// Update an existing user (personality is the only mutable field)
    fn update_user(&self, user: &User) -> Result<()>;
}

/// Interface for delivery log storage operations.
pub trait DeliveryLogStorage: Send + Sync {
    /// Store a new delivery log (one durable write per outreach attempt)
    fn store_log(&self, log: &DeliveryLog) -> Result<()>;

    /// Retrieve a specific log by ID
    fn get_log(&self, log_id: &str) -> Result<Option<DeliveryLog>>;

    /// List all logs, most recent first
    fn list_logs(&self) -> Result<Vec<DeliveryLog>>;

    /// List one user's logs, most recent first
    fn list_logs_for_user(&self, user_id: &str) -> Result<Vec<DeliveryLog>>;

    /// Overwrite the response field for a log (last write wins).
    /// Returns false when the log does not exist.
    fn update_response(&self, log_id: &str, response: &str) -> Result<bool>;
}

/// Interface for symptom report storage operations. Append-only.
pub trait SymptomStorage: Send + Sync {
    /// Append a symptom report
    fn store_report(&self, report: &SymptomReport) -> Result<()>;

    /// List one user's reports, most recent first
    fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<SymptomReport>>;
}

/// Interface for notification feed storage operations.
pub trait NotificationStorage: Send + Sync {
    /// Append a notification
    fn store_notification(&self, notification: &Notification) -> Result<()>;

    /// List one user's notifications, most recent first
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Flip the read flag for a notification.
    /// Returns false when the notification does not exist.
    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<bool>;
}
