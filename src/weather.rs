//! Weather lookups, which double as the check that a city exists at all.
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Debug;

/// Anything that can report the current temperature in a city.
///
/// `None` means the city is unknown or the service could not answer; callers treat both the same.
#[async_trait]
pub(crate) trait WeatherClient: Send + Sync + Debug {
    async fn current_temperature(&self, city: &str) -> Option<f64>;
}

/// Client for the OpenWeatherMap "current weather" endpoint, in metric units.
#[derive(Debug, Clone)]
pub(crate) struct OpenWeatherClient {
    url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub(crate) fn new(url: String, api_key: String) -> Self {
        Self {
            url,
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch_temperature(&self, city: &str) -> Result<Option<f64>> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("units", "metric"),
                ("q", city),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather")?;

        let status = res.status();
        if status != StatusCode::OK {
            tracing::debug!("OpenWeather answered {} for city '{}'", status, city);
            return Ok(None);
        }

        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather response body")?;

        parse_temperature(&body).map(Some)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        match self.fetch_temperature(city).await {
            Ok(temperature) => temperature,
            Err(e) => {
                tracing::warn!("Weather lookup for '{}' failed: {:#}", city, e);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
}

/// Pull `main.temp` out of a current-weather response body.
fn parse_temperature(body: &str) -> Result<f64> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;
    Ok(parsed.main.temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_temperature_from_full_body() {
        let body = r#"{
            "coord": {"lon": 49.12, "lat": 55.79},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
            "main": {"temp": -3.5, "feels_like": -8.1, "humidity": 80},
            "name": "Kazan",
            "cod": 200
        }"#;

        assert_eq!(parse_temperature(body).unwrap(), -3.5);
    }

    #[test]
    fn integer_temperatures_are_accepted() {
        assert_eq!(parse_temperature(r#"{"main": {"temp": 21}}"#).unwrap(), 21.0);
    }

    #[test]
    fn body_without_temperature_is_an_error() {
        let err = parse_temperature(r#"{"cod": "404", "message": "city not found"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse OpenWeather"));
    }

    #[tokio::test]
    async fn unreachable_service_reads_as_unknown_city() {
        // nothing listens on port 9 of localhost
        let client = OpenWeatherClient::new("http://127.0.0.1:9/weather".into(), "KEY".into());

        assert_eq!(client.current_temperature("Kazan").await, None);
    }
}
