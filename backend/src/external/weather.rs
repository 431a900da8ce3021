//! Weather API client for fetching current conditions
//!
//! Integrates with OpenWeatherMap to resolve GPS coordinates into the
//! temperature/humidity readings consumed by the risk assessment. The scan
//! pipeline treats this data as optional: a failed fetch degrades the
//! response, it never fails the scan.

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherSnapshot;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
    clouds: Option<OwmClouds>,
    rain: Option<OwmRain>,
    sys: Option<OwmSys>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current weather conditions by GPS coordinates (metric units)
    pub async fn get_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherSnapshot> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse weather response: {}", e)))?;

        Ok(convert_current_response(data))
    }
}

/// Convert OpenWeatherMap current response to our snapshot format
fn convert_current_response(data: OwmCurrentResponse) -> WeatherSnapshot {
    let description = data
        .weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_default();

    WeatherSnapshot {
        temperature: data.main.temp,
        feels_like: data.main.feels_like,
        humidity: data.main.humidity,
        pressure: data.main.pressure,
        description,
        wind_speed: data.wind.speed,
        city: data.name.unwrap_or_else(|| "Unknown".to_string()),
        country: data.sys.and_then(|s| s.country).unwrap_or_default(),
        clouds: data.clouds.map(|c| c.all).unwrap_or(0),
        rain_1h: data.rain.as_ref().and_then(|r| r.one_hour).unwrap_or(0.0),
        rain_3h: data.rain.as_ref().and_then(|r| r.three_hour).unwrap_or(0.0),
    }
}

/// Capitalize each word of a condition description, e.g. "scattered clouds"
/// becomes "Scattered Clouds".
fn title_case(description: &str) -> String {
    description
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
