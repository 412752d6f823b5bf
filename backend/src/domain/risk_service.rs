use log::debug;

use crate::domain::models::RiskAssessment;
use crate::domain::{geo, risk};
use crate::providers::WeatherGauge;

/// Orchestrates one fresh risk assessment: resolve coordinates, fetch
/// rainfall, classify.
///
/// Nothing here caches: every call re-fetches weather so the assessment is
/// always current, and the weather gauge's own failure policy (retries, then
/// 0.0 mm) means this never fails.
#[derive(Clone)]
pub struct RiskService {
    weather: WeatherGauge,
}

impl RiskService {
    pub fn new(weather: WeatherGauge) -> Self {
        Self { weather }
    }

    pub async fn assess(&self, lga: &str) -> RiskAssessment {
        let coords = geo::resolve(lga);
        let rainfall_mm = self.weather.recent_rainfall_mm(coords).await;
        debug!("assessing {lga}: {rainfall_mm:.1}mm over the last 24h");
        risk::classify(lga, rainfall_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RiskLevel;
    use crate::providers::{MockRainSwitch, MOCK_RAINFALL_MM};

    #[tokio::test]
    async fn mock_rain_drives_a_high_assessment_anywhere() {
        let mock = MockRainSwitch::new();
        mock.set(true);
        let service = RiskService::new(WeatherGauge::with_base_url("http://127.0.0.1:1", mock));

        let assessment = service.assess("Ikeja").await;
        assert_eq!(assessment.rainfall_mm, MOCK_RAINFALL_MM);
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.factors.iter().any(|f| f.contains("cholera")));
    }

    #[tokio::test]
    async fn unreachable_weather_still_produces_an_assessment() {
        // Unknown LGA + dead weather endpoint: coordinates default, rainfall
        // degrades to 0.0, classification proceeds without error.
        let service = RiskService::new(WeatherGauge::with_base_url(
            "http://127.0.0.1:1",
            MockRainSwitch::new(),
        ));

        let assessment = service.assess("Nowhere Particular").await;
        assert_eq!(assessment.rainfall_mm, 0.0);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.factors.is_empty());
    }
}
