//! API error taxonomy
//!
//! Every expected failure is converted at the handler boundary into a status
//! code and a generic `{ success: false, msg }` body. Internal detail is
//! logged server-side and never returned to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use skycast_weather::WeatherError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or missing/invalid/expired token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate username or duplicate history entry (409)
    #[error("{0}")]
    Conflict(String),

    /// External weather provider failure (500, generic message)
    #[error("weather service unavailable")]
    Upstream,

    /// Unexpected store or runtime failure (500, generic message)
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            success: false,
            msg: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        // Unique-constraint violations are expected (username / saved-city
        // races resolve at the store); everything else is unexpected.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("already exists".to_string())
            }
            _ => {
                error!("Database error: {err}");
                ApiError::Internal
            }
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::CityNotFound => ApiError::NotFound("city not found".to_string()),
            other => {
                error!("Weather provider error: {other}");
                ApiError::Upstream
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failure_does_not_leak_detail() {
        let err = ApiError::from(WeatherError::Provider { status: 503 });

        assert!(matches!(err, ApiError::Upstream));
        assert!(!err.to_string().contains("503"));
    }

    #[test]
    fn test_city_not_found_maps_to_not_found() {
        let err = ApiError::from(WeatherError::CityNotFound);

        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
