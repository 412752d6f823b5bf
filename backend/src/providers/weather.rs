//! Open-Meteo weather gauge.
//!
//! Fetches an hourly precipitation series and sums the trailing 24 hours.
//! This provider must never block risk assessment: after three failed
//! attempts the gauge reports 0.0 mm and the pipeline carries on.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::geo::Coordinates;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ATTEMPTS: u32 = 3;
const ATTEMPT_PAUSE_SECS: u64 = 1;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Rainfall reported while the mock switch is on.
pub const MOCK_RAINFALL_MM: f64 = 25.5;

/// Process-wide test-mode override for the weather gauge.
///
/// One cell shared by every request; read fresh at the start of every
/// rainfall call, so toggling it takes effect on the very next call
/// system-wide. Mutated only through the admin endpoint.
#[derive(Debug, Clone, Default)]
pub struct MockRainSwitch {
    enabled: Arc<AtomicBool>,
}

impl MockRainSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(String),
    #[error("weather provider returned status {0}")]
    Status(u16),
    #[error("weather response missing hourly precipitation series")]
    MalformedResponse,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    precipitation: Vec<f64>,
}

/// Client for recent-rainfall lookups.
#[derive(Clone)]
pub struct WeatherGauge {
    client: reqwest::Client,
    base_url: String,
    mock: MockRainSwitch,
}

impl WeatherGauge {
    pub fn new(mock: MockRainSwitch) -> Self {
        Self::with_base_url(OPEN_METEO_URL, mock)
    }

    /// Point the gauge at a different endpoint (tests).
    pub fn with_base_url(base_url: &str, mock: MockRainSwitch) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client construction cannot fail with static config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mock,
        }
    }

    /// Total rainfall (mm) over the trailing 24 hours at the given point.
    ///
    /// Never fails: provider trouble degrades to 0.0 after bounded retries,
    /// and the mock switch short-circuits the lookup entirely.
    pub async fn recent_rainfall_mm(&self, coords: Coordinates) -> f64 {
        if self.mock.enabled() {
            debug!("mock rain switch on, reporting {MOCK_RAINFALL_MM}mm");
            return MOCK_RAINFALL_MM;
        }

        for attempt in 1..=ATTEMPTS {
            match self.fetch_series(coords).await {
                Ok(series) => return sum_trailing_24h(&series, Utc::now()),
                Err(e) => {
                    warn!("weather fetch attempt {attempt}/{ATTEMPTS} failed: {e}");
                    if attempt < ATTEMPTS {
                        tokio::time::sleep(std::time::Duration::from_secs(ATTEMPT_PAUSE_SECS))
                            .await;
                    }
                }
            }
        }
        0.0
    }

    async fn fetch_series(&self, coords: Coordinates) -> Result<HourlySeries, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lon.to_string()),
                ("hourly", "precipitation".to_string()),
                ("past_days", "1".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let parsed: ForecastResponse = response
            .json()
            .await
            .map_err(|_| WeatherError::MalformedResponse)?;

        parsed.hourly.ok_or(WeatherError::MalformedResponse)
    }
}

/// Sum the samples whose timestamp falls within the last 24 hours of `now`.
///
/// Open-Meteo timestamps look like `2026-02-21T14:00` and are UTC because we
/// request `timezone=UTC`. Unparseable entries are skipped.
fn sum_trailing_24h(series: &HourlySeries, now: DateTime<Utc>) -> f64 {
    let cutoff = now - Duration::hours(24);

    series
        .time
        .iter()
        .zip(series.precipitation.iter())
        .filter_map(|(stamp, mm)| {
            let parsed = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M").ok()?;
            let at = parsed.and_utc();
            (at >= cutoff && at <= now).then_some(*mm)
        })
        .sum()
}
