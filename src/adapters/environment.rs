//! Environmental-reading adapter
//!
//! Fetches weather per city for the requested region and derives a solar
//! efficiency score. Failure isolation is per location: a bad fetch
//! substitutes a synthetic reading for that city only.

use super::{FetchParams, SourceAdapter};
use crate::config::WeatherConfig;
use crate::error::{AnalyzerError, Result};
use crate::fallback;
use crate::types::{Region, SolarReading};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const GLOBAL_CITIES: &[&str] = &["New York", "London", "Tokyo", "Sydney"];
const US_CITIES: &[&str] = &["Los Angeles", "Phoenix", "Miami", "Denver"];
const EU_CITIES: &[&str] = &["Madrid", "Rome", "Athens", "Lisbon"];
const ASIA_CITIES: &[&str] = &["Delhi", "Beijing", "Bangkok", "Jakarta"];

/// Fixed city list per region.
pub fn cities_for(region: Region) -> &'static [&'static str] {
    match region {
        Region::Global => GLOBAL_CITIES,
        Region::Us => US_CITIES,
        Region::Eu => EU_CITIES,
        Region::Asia => ASIA_CITIES,
    }
}

/// Derived panel efficiency percentage, floored at 5.
///
/// Temperature only penalizes above 25°C; cloud cover and humidity always
/// subtract.
pub fn solar_efficiency(temp: f64, clouds: f64, humidity: f64) -> f64 {
    let base = 20.0;
    let temp_factor = if temp > 25.0 { 0.4 * (25.0 - temp) } else { 0.0 };
    let cloud_factor = -0.15 * clouds;
    let humidity_factor = -0.05 * humidity;

    (base + temp_factor + cloud_factor + humidity_factor).max(5.0)
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    clouds: CloudCover,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct CloudCover {
    all: f64,
}

pub struct EnvironmentalAdapter {
    http: Client,
    config: WeatherConfig,
}

impl EnvironmentalAdapter {
    pub fn new(config: WeatherConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    async fn fetch_city(&self, city: &str) -> Result<SolarReading> {
        let key = self.config.api_key.as_ref().ok_or_else(|| {
            AnalyzerError::Config("weather api key not configured".to_string())
        })?;

        let resp: WeatherResponse = self
            .http
            .get(&self.config.endpoint)
            .query(&[("q", city), ("appid", key.as_str()), ("units", "metric")])
            .send()
            .await?
            .json()
            .await?;

        Ok(SolarReading {
            city: city.to_string(),
            temperature: resp.main.temp,
            humidity: resp.main.humidity,
            cloudiness: resp.clouds.all,
            solar_efficiency: solar_efficiency(resp.main.temp, resp.clouds.all, resp.main.humidity),
        })
    }
}

#[async_trait]
impl SourceAdapter for EnvironmentalAdapter {
    type Item = SolarReading;

    fn name(&self) -> &'static str {
        "environment"
    }

    async fn fetch(&self, params: &FetchParams) -> Result<Vec<SolarReading>> {
        let cities = cities_for(params.region);
        let mut readings = Vec::with_capacity(cities.len());

        for city in cities {
            match self.fetch_city(city).await {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    warn!("Weather fetch failed for {}: {}", city, e);
                    readings.push(fallback::synthetic_reading(city));
                }
            }
        }

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_efficiency_reference_case() {
        // 20 + 0.4*(25-30) - 0.15*50 - 0.05*60 = 20 - 2 - 7.5 - 3 = 7.5
        assert_eq!(solar_efficiency(30.0, 50.0, 60.0), 7.5);
    }

    #[test]
    fn test_solar_efficiency_no_temp_penalty_at_or_below_25() {
        assert_eq!(solar_efficiency(25.0, 0.0, 0.0), 20.0);
        assert_eq!(solar_efficiency(10.0, 0.0, 0.0), 20.0);
    }

    #[test]
    fn test_solar_efficiency_floor() {
        assert_eq!(solar_efficiency(45.0, 100.0, 100.0), 5.0);
    }

    #[test]
    fn test_city_lists() {
        assert_eq!(cities_for(Region::Global), GLOBAL_CITIES);
        assert_eq!(cities_for(Region::Us)[1], "Phoenix");
        assert_eq!(cities_for(Region::Asia).len(), 4);
        // unrecognized regions parse to Global and get the same list
        assert_eq!(cities_for(Region::parse("atlantis")), GLOBAL_CITIES);
    }

    #[test]
    fn test_weather_response_deserializes() {
        let body = r#"{
            "main": {"temp": 28.5, "humidity": 40, "pressure": 1013},
            "clouds": {"all": 20},
            "name": "Phoenix"
        }"#;

        let resp: WeatherResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.main.temp, 28.5);
        assert_eq!(resp.clouds.all, 20.0);
    }
}
