//! Client for the external weather provider
//!
//! The provider is treated as an opaque HTTP JSON source: one endpoint, one
//! API key, no retries. Failures are mapped into [`WeatherError`] so the API
//! layer can translate them without leaking provider internals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default provider endpoint (OpenWeatherMap current weather)
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Weather provider errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider does not know the requested city
    #[error("City not found")]
    CityNotFound,

    /// Provider answered with a non-success status
    #[error("Weather provider returned status {status}")]
    Provider { status: u16 },

    /// Transport-level failure reaching the provider
    #[error("Weather provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered 200 but the payload is not in the expected shape
    #[error("Unexpected weather provider payload")]
    BadPayload,
}

/// A single current-weather observation, shaped for storage and API output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// City name as reported by the provider
    pub city: String,
    /// Weather group, e.g. "Clear", "Rain", "Clouds"
    pub weather_type: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Free-text description, e.g. "light rain"
    pub description: Option<String>,
    /// Relative humidity percentage (0-100)
    pub humidity: Option<i32>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
}

/// Raw provider response, only the fields this service consumes
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    name: String,
    weather: Vec<ProviderCondition>,
    main: ProviderMain,
    wind: Option<ProviderWind>,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    humidity: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    speed: Option<f64>,
}

impl ProviderResponse {
    fn into_observation(self) -> Result<WeatherObservation, WeatherError> {
        // The provider always sends at least one condition for a known city
        let condition = self.weather.into_iter().next().ok_or(WeatherError::BadPayload)?;

        Ok(WeatherObservation {
            city: self.name,
            weather_type: condition.main,
            temperature: self.main.temp,
            description: condition.description,
            humidity: self.main.humidity,
            wind_speed: self.wind.and_then(|w| w.speed),
        })
    }
}

/// Weather provider client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the provider endpoint (tests point this at a local stub)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch the current weather for a city, in metric units.
    pub async fn current(&self, city: &str) -> Result<WeatherObservation, WeatherError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Provider {
                status: status.as_u16(),
            });
        }

        let payload: ProviderResponse = response.json().await.map_err(|_| WeatherError::BadPayload)?;
        payload.into_observation()
    }
}
