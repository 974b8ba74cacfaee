//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Authentication Models
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Login username (must be unique)
    pub username: String,
    /// Password (stored only as an argon2id hash)
    pub password: String,
    /// Display name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Default city for weather lookups (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Signin request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninRequest {
    /// Login username
    pub username: String,
    /// Password
    pub password: String,
}

/// Signin response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninResponse {
    /// Always true on the success path
    pub success: bool,
    /// Session token, already prefixed with the `Bearer` scheme so it can be
    /// pasted directly into an Authorization header
    pub token: String,
}

// ============================================================================
// History Models
// ============================================================================

/// Body for history add/remove
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryRequest {
    /// City to save or remove
    pub city: String,
}

// ============================================================================
// Weather Models
// ============================================================================

/// Current weather for a city
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherResponse {
    /// Always true on the success path
    pub success: bool,
    /// City name as reported by the provider
    pub city: String,
    /// Weather group, e.g. "Clear", "Rain", "Clouds"
    pub weather_type: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Free-text description, e.g. "light rain"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Relative humidity percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i32>,
    /// Wind speed in m/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Whether this observation was served from the database cache
    pub cached: bool,
}

// ============================================================================
// Generic Models
// ============================================================================

/// Generic confirmation response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Always true on the success path
    pub success: bool,
    /// Human-readable confirmation
    pub msg: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false on the failure path
    pub success: bool,
    /// Generic error message; never contains internal detail
    pub msg: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}
