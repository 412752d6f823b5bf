use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::SymptomReport;
use crate::storage::traits::SymptomStorage;

const HEADER: &str = "id,user_id,timestamp,fever,cough,headache,fatigue,diarrhea,vomiting,notes,lat,lon";

/// CSV-backed symptom report repository: one `symptoms.csv` per user folder,
/// append-only.
#[derive(Clone)]
pub struct SymptomRepository {
    connection: CsvConnection,
}

impl SymptomRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_reports(&self, user_id: &str) -> Result<Vec<SymptomReport>> {
        let path = self.connection.symptoms_file_path(user_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut reports = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let timestamp = match DateTime::parse_from_rfc3339(record.get(2).unwrap_or("")) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(_) => {
                    warn!("skipping symptom row with unparseable timestamp");
                    continue;
                }
            };
            reports.push(SymptomReport {
                id: record.get(0).unwrap_or("").to_string(),
                user_id: record.get(1).unwrap_or("").to_string(),
                timestamp,
                fever: parse_flag(record.get(3)),
                cough: parse_flag(record.get(4)),
                headache: parse_flag(record.get(5)),
                fatigue: parse_flag(record.get(6)),
                diarrhea: parse_flag(record.get(7)),
                vomiting: parse_flag(record.get(8)),
                notes: record.get(9).unwrap_or("").to_string(),
                lat: parse_coord(record.get(10)),
                lon: parse_coord(record.get(11)),
            });
        }
        Ok(reports)
    }

    fn write_reports(&self, user_id: &str, reports: &[SymptomReport]) -> Result<()> {
        self.connection.ensure_user_directory(user_id)?;
        let path = self.connection.symptoms_file_path(user_id);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(HEADER.split(','))?;
        for report in reports {
            let timestamp = report.timestamp.to_rfc3339();
            let lat = coord_str(report.lat);
            let lon = coord_str(report.lon);
            csv_writer.write_record(&[
                report.id.as_str(),
                report.user_id.as_str(),
                timestamp.as_str(),
                bool_str(report.fever),
                bool_str(report.cough),
                bool_str(report.headache),
                bool_str(report.fatigue),
                bool_str(report.diarrhea),
                bool_str(report.vomiting),
                report.notes.as_str(),
                lat.as_str(),
                lon.as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn parse_coord(value: Option<&str>) -> Option<f64> {
    value.filter(|v| !v.is_empty()).and_then(|v| v.parse().ok())
}

fn coord_str(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl SymptomStorage for SymptomRepository {
    fn store_report(&self, report: &SymptomReport) -> Result<()> {
        let mut reports = self.read_reports(&report.user_id)?;
        reports.push(report.clone());
        self.write_reports(&report.user_id, &reports)
    }

    fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<SymptomReport>> {
        let mut reports = self.read_reports(user_id)?;
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn report(user_id: &str, fever: bool, notes: &str) -> SymptomReport {
        SymptomReport {
            id: SymptomReport::generate_id(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            fever,
            cough: false,
            headache: true,
            fatigue: false,
            diarrhea: false,
            vomiting: false,
            notes: notes.to_string(),
            lat: Some(12.0022),
            lon: None,
        }
    }

    #[test]
    fn store_and_list_round_trip() {
        let dir = tempdir().unwrap();
        let repo = SymptomRepository::new(CsvConnection::new(dir.path()).unwrap());

        let r = report("u1", true, "feeling hot since morning, no appetite");
        repo.store_report(&r).unwrap();

        let reports = repo.list_reports_for_user("u1").unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].fever);
        assert!(reports[0].headache);
        assert!(!reports[0].vomiting);
        assert_eq!(reports[0].notes, "feeling hot since morning, no appetite");
        assert_eq!(reports[0].lat, Some(12.0022));
        assert_eq!(reports[0].lon, None);
    }

    #[test]
    fn listing_is_most_recent_first() {
        let dir = tempdir().unwrap();
        let repo = SymptomRepository::new(CsvConnection::new(dir.path()).unwrap());

        let mut older = report("u1", false, "older");
        older.timestamp = Utc::now() - chrono::Duration::days(1);
        let newer = report("u1", true, "newer");

        repo.store_report(&older).unwrap();
        repo.store_report(&newer).unwrap();

        let reports = repo.list_reports_for_user("u1").unwrap();
        assert_eq!(reports[0].notes, "newer");
        assert_eq!(reports[1].notes, "older");
    }

    #[test]
    fn users_do_not_see_each_others_reports() {
        let dir = tempdir().unwrap();
        let repo = SymptomRepository::new(CsvConnection::new(dir.path()).unwrap());

        repo.store_report(&report("u1", true, "mine")).unwrap();
        assert!(repo.list_reports_for_user("u2").unwrap().is_empty());
    }
}
