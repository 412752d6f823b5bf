//! LGA name → coordinates resolution.
//!
//! A static lookup table covering the LGAs the service is piloted in. The
//! resolver is total: unknown names get the national-capital default so the
//! pipeline always has a point to query weather for.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A (latitude, longitude) pair. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Abuja; used whenever an LGA name is not in the table.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates { lat: 9.0765, lon: 7.3986 };

static LGA_COORDINATES: Lazy<HashMap<&'static str, Coordinates>> = Lazy::new(|| {
    HashMap::from([
        ("Kano Municipal", Coordinates { lat: 12.0022, lon: 8.5920 }),
        ("Kano", Coordinates { lat: 12.0022, lon: 8.5920 }),
        ("Ikeja", Coordinates { lat: 6.5913, lon: 3.3367 }),
        ("Lagos", Coordinates { lat: 6.5244, lon: 3.3792 }),
        ("Abuja", Coordinates { lat: 9.0765, lon: 7.3986 }),
        ("Makurdi", Coordinates { lat: 7.7323, lon: 8.5212 }),
        ("Benue", Coordinates { lat: 7.3369, lon: 8.7404 }),
        ("Maiduguri", Coordinates { lat: 11.8311, lon: 13.1507 }),
        ("Port Harcourt", Coordinates { lat: 4.8156, lon: 7.0498 }),
        ("Enugu North", Coordinates { lat: 6.4484, lon: 7.5143 }),
        ("Jos North", Coordinates { lat: 9.8965, lon: 8.8583 }),
        ("Sokoto", Coordinates { lat: 13.0059, lon: 5.2476 }),
    ])
});

/// Resolve an LGA name to coordinates.
///
/// Exact-key lookup; misses return [`DEFAULT_COORDINATES`] rather than
/// failing. Total over all string inputs.
pub fn resolve(lga: &str) -> Coordinates {
    LGA_COORDINATES.get(lga).copied().unwrap_or(DEFAULT_COORDINATES)
}
