use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::{DeliveryLog, RiskLevel};
use crate::storage::traits::DeliveryLogStorage;

const HEADER: &str = "id,user_id,timestamp,risk_level,script,audio_url,response";

/// CSV-backed delivery log repository.
///
/// One global file: the response webhook addresses logs by id alone, without
/// any user context, so per-user files would force a scan anyway.
#[derive(Clone)]
pub struct DeliveryLogRepository {
    connection: CsvConnection,
}

impl DeliveryLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_logs(&self) -> Result<Vec<DeliveryLog>> {
        let path = self.connection.deliveries_file_path();
        self.connection.ensure_csv_file(&path, HEADER)?;

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut logs = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let timestamp = match parse_timestamp(record.get(2).unwrap_or("")) {
                Some(ts) => ts,
                None => {
                    warn!("skipping delivery row with unparseable timestamp");
                    continue;
                }
            };
            logs.push(DeliveryLog {
                id: record.get(0).unwrap_or("").to_string(),
                user_id: record.get(1).unwrap_or("").to_string(),
                timestamp,
                risk_level: RiskLevel::parse(record.get(3).unwrap_or("")),
                script: record.get(4).unwrap_or("").to_string(),
                audio_url: non_empty(record.get(5)),
                response: non_empty(record.get(6)),
            });
        }
        Ok(logs)
    }

    fn write_logs(&self, logs: &[DeliveryLog]) -> Result<()> {
        let path = self.connection.deliveries_file_path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(HEADER.split(','))?;
        for log in logs {
            let timestamp = log.timestamp.to_rfc3339();
            let risk_level = log.risk_level.to_string();
            csv_writer.write_record(&[
                log.id.as_str(),
                log.user_id.as_str(),
                timestamp.as_str(),
                risk_level.as_str(),
                log.script.as_str(),
                log.audio_url.as_deref().unwrap_or(""),
                log.response.as_deref().unwrap_or(""),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl DeliveryLogStorage for DeliveryLogRepository {
    fn store_log(&self, log: &DeliveryLog) -> Result<()> {
        let mut logs = self.read_logs()?;
        logs.push(log.clone());
        self.write_logs(&logs)
    }

    fn get_log(&self, log_id: &str) -> Result<Option<DeliveryLog>> {
        Ok(self.read_logs()?.into_iter().find(|l| l.id == log_id))
    }

    fn list_logs(&self) -> Result<Vec<DeliveryLog>> {
        let mut logs = self.read_logs()?;
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(logs)
    }

    fn list_logs_for_user(&self, user_id: &str) -> Result<Vec<DeliveryLog>> {
        let mut logs: Vec<_> = self
            .read_logs()?
            .into_iter()
            .filter(|l| l.user_id == user_id)
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(logs)
    }

    fn update_response(&self, log_id: &str, response: &str) -> Result<bool> {
        let mut logs = self.read_logs()?;
        let Some(log) = logs.iter_mut().find(|l| l.id == log_id) else {
            return Ok(false);
        };
        log.response = Some(response.to_string());
        self.write_logs(&logs)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_log(user_id: &str, script: &str) -> DeliveryLog {
        DeliveryLog::new(user_id, RiskLevel::High, script.to_string(), None)
    }

    #[test]
    fn store_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let repo = DeliveryLogRepository::new(CsvConnection::new(dir.path()).unwrap());

        let log = DeliveryLog::new(
            "u1",
            RiskLevel::High,
            "Heavy rain, use your net".to_string(),
            Some("http://localhost:8000/audio/a.mp3".to_string()),
        );
        repo.store_log(&log).unwrap();

        let loaded = repo.get_log(&log.id).unwrap().unwrap();
        assert_eq!(loaded.script, "Heavy rain, use your net");
        assert_eq!(loaded.risk_level, RiskLevel::High);
        assert_eq!(
            loaded.audio_url.as_deref(),
            Some("http://localhost:8000/audio/a.mp3")
        );
        assert!(loaded.response.is_none());
    }

    #[test]
    fn scripts_with_commas_and_quotes_survive() {
        let dir = tempdir().unwrap();
        let repo = DeliveryLogRepository::new(CsvConnection::new(dir.path()).unwrap());

        let script = "Cover food, boil water, and sleep under a net";
        let log = test_log("u1", script);
        repo.store_log(&log).unwrap();

        assert_eq!(repo.get_log(&log.id).unwrap().unwrap().script, script);
    }

    #[test]
    fn update_response_overwrites_idempotently() {
        let dir = tempdir().unwrap();
        let repo = DeliveryLogRepository::new(CsvConnection::new(dir.path()).unwrap());

        let log = test_log("u1", "s");
        repo.store_log(&log).unwrap();

        assert!(repo.update_response(&log.id, "fever").unwrap());
        assert_eq!(
            repo.get_log(&log.id).unwrap().unwrap().response.as_deref(),
            Some("fever")
        );

        // Last write wins; a duplicate response does not duplicate anything.
        assert!(repo.update_response(&log.id, "fine").unwrap());
        let logs = repo.list_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].response.as_deref(), Some("fine"));
    }

    #[test]
    fn update_response_on_missing_log_returns_false() {
        let dir = tempdir().unwrap();
        let repo = DeliveryLogRepository::new(CsvConnection::new(dir.path()).unwrap());
        assert!(!repo.update_response("missing", "fever").unwrap());
    }

    #[test]
    fn listing_is_most_recent_first_and_filtered_by_user() {
        let dir = tempdir().unwrap();
        let repo = DeliveryLogRepository::new(CsvConnection::new(dir.path()).unwrap());

        let mut older = test_log("u1", "older");
        older.timestamp = Utc::now() - chrono::Duration::hours(2);
        let newer = test_log("u1", "newer");
        let other = test_log("u2", "other");

        repo.store_log(&older).unwrap();
        repo.store_log(&newer).unwrap();
        repo.store_log(&other).unwrap();

        let for_user = repo.list_logs_for_user("u1").unwrap();
        assert_eq!(for_user.len(), 2);
        assert_eq!(for_user[0].script, "newer");
        assert_eq!(for_user[1].script, "older");

        assert_eq!(repo.list_logs().unwrap().len(), 3);
    }
}
