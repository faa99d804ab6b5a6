use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::WeatherSettings;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no weather API key configured (set VAROS_WEATHER_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid weather URL '{0}'")]
    InvalidUrl(String),
}

/// OpenWeatherMap "current weather" payload
///
/// Only `coord`, `main`, `visibility`, `wind` and `name` are needed for the
/// panel; everything else defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: MainReadings,
    pub visibility: i64,
    pub wind: Wind,
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: Sys,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperatures are in Kelvin, humidity in percent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

impl CurrentWeather {
    pub fn from_json(body: &[u8]) -> Result<Self, WeatherError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Build the request URL for a city query key
pub fn request_url(settings: &WeatherSettings, city: &str) -> Result<reqwest::Url, WeatherError> {
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(WeatherError::MissingApiKey)?;

    let mut url = reqwest::Url::parse(&settings.base_url)
        .map_err(|_| WeatherError::InvalidUrl(settings.base_url.clone()))?;
    url.query_pairs_mut()
        .append_pair("q", city)
        .append_pair("APPID", api_key);
    Ok(url)
}

/// Fetch current conditions for one city
pub async fn fetch_current(
    client: reqwest::Client,
    settings: WeatherSettings,
    city: String,
) -> Result<CurrentWeather, WeatherError> {
    // Missing key or bad base URL fail before any traffic
    let url = request_url(&settings, &city)?;
    debug!(city = %city, "fetching weather");

    // Per-request timeout so a stalled server only stalls this fetch
    let response = client
        .get(url)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .send()
        .await?;

    // Keep the body for error statuses too; the API explains itself there
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(WeatherError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let weather = CurrentWeather::from_json(&body)?;
    info!(city = %city, "🌤️  Weather received for {}", weather.name);
    Ok(weather)
}
