use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::{Notification, NotificationCategory};
use crate::storage::traits::NotificationStorage;

const HEADER: &str = "id,user_id,timestamp,title,body,category,read";

/// CSV-backed notification feed: one `notifications.csv` per user folder.
#[derive(Clone)]
pub struct NotificationRepository {
    connection: CsvConnection,
}

impl NotificationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let path = self.connection.notifications_file_path(user_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut notifications = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let timestamp = match DateTime::parse_from_rfc3339(record.get(2).unwrap_or("")) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(_) => {
                    warn!("skipping notification row with unparseable timestamp");
                    continue;
                }
            };
            notifications.push(Notification {
                id: record.get(0).unwrap_or("").to_string(),
                user_id: record.get(1).unwrap_or("").to_string(),
                timestamp,
                title: record.get(3).unwrap_or("").to_string(),
                body: record.get(4).unwrap_or("").to_string(),
                category: NotificationCategory::parse(record.get(5).unwrap_or("")),
                read: record.get(6) == Some("true"),
            });
        }
        Ok(notifications)
    }

    fn write_notifications(&self, user_id: &str, notifications: &[Notification]) -> Result<()> {
        self.connection.ensure_user_directory(user_id)?;
        let path = self.connection.notifications_file_path(user_id);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(HEADER.split(','))?;
        for n in notifications {
            let timestamp = n.timestamp.to_rfc3339();
            let category = n.category.to_string();
            csv_writer.write_record(&[
                n.id.as_str(),
                n.user_id.as_str(),
                timestamp.as_str(),
                n.title.as_str(),
                n.body.as_str(),
                category.as_str(),
                if n.read { "true" } else { "false" },
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl NotificationStorage for NotificationRepository {
    fn store_notification(&self, notification: &Notification) -> Result<()> {
        let mut notifications = self.read_notifications(&notification.user_id)?;
        notifications.push(notification.clone());
        self.write_notifications(&notification.user_id, &notifications)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut notifications = self.read_notifications(user_id)?;
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notifications)
    }

    fn mark_read(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        let mut notifications = self.read_notifications(user_id)?;
        let Some(n) = notifications.iter_mut().find(|n| n.id == notification_id) else {
            return Ok(false);
        };
        n.read = true;
        self.write_notifications(user_id, &notifications)?;
        Ok(true)
    }
}
