//! # File-Based Storage
//!
//! CSV/YAML storage for the alerting service. Each user gets a folder with a
//! YAML profile and per-user CSV files; delivery logs live in one global CSV
//! because the response webhook addresses them by id alone.
//!
//! Writes are whole-file rewrites of small files, committed immediately after
//! the record they carry, so each store/update is a single short transaction.

pub mod connection;
pub mod delivery_repository;
pub mod notification_repository;
pub mod symptom_repository;
pub mod user_repository;

pub use connection::CsvConnection;
pub use delivery_repository::DeliveryLogRepository;
pub use notification_repository::NotificationRepository;
pub use symptom_repository::SymptomRepository;
pub use user_repository::UserRepository;
