use anyhow::Result;
use log::info;

use crate::domain::models::{Notification, NotificationCategory};
use crate::storage::csv::{CsvConnection, NotificationRepository};
use crate::storage::traits::NotificationStorage;

/// Service for the in-app notification feed.
#[derive(Clone)]
pub struct NotificationService {
    notification_repository: NotificationRepository,
}

impl NotificationService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            notification_repository: NotificationRepository::new(connection),
        }
    }

    pub fn push(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        category: NotificationCategory,
    ) -> Result<Notification> {
        let notification = Notification::new(user_id, title, body, category);
        self.notification_repository.store_notification(&notification)?;
        info!("pushed {category} notification to user {user_id}");
        Ok(notification)
    }

    pub fn list(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.notification_repository.list_for_user(user_id)
    }

    /// Returns false when the notification does not exist.
    pub fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        self.notification_repository.mark_read(user_id, notification_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn push_list_mark_read_flow() {
        let dir = tempdir().unwrap();
        let service = NotificationService::new(CsvConnection::new(dir.path()).unwrap());

        let n = service
            .push("u1", "Mock Rain Enabled", "Environmental risks are now simulated.", NotificationCategory::Rain)
            .unwrap();
        service
            .push("u1", "Health Alert", "HIGH risk in Kano", NotificationCategory::Alert)
            .unwrap();

        let feed = service.list("u1").unwrap();
        assert_eq!(feed.len(), 2);

        assert!(service.mark_read("u1", &n.id).unwrap());
        assert!(!service.mark_read("u1", "missing").unwrap());

        let rain = service
            .list("u1")
            .unwrap()
            .into_iter()
            .find(|x| x.id == n.id)
            .unwrap();
        assert!(rain.read);
    }
}
