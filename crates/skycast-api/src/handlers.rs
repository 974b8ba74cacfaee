//! Route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use skycast_auth::{hash_password, verify_password, JwtValidator, SessionClaims};
use skycast_db::entities::{saved_city, search, user, weather_report};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

/// How long a cached weather report stays fresh
const WEATHER_CACHE_TTL_MINUTES: i64 = 10;

fn require_field(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Create a new user account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    require_field(&payload.username, "username")?;
    require_field(&payload.password, "password")?;

    // Hash before persistence; a hashing failure must never let a plaintext
    // password reach the store.
    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        ApiError::Internal
    })?;

    let now = Utc::now();
    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(payload.username.clone()),
        password_hash: Set(password_hash),
        name: Set(payload.name),
        location: Set(payload.location),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // The unique index on username is the sole arbiter of signup races.
    new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::Conflict("username already exists".to_string())
        }
        _ => ApiError::from(e),
    })?;

    info!("Created user '{}'", payload.username);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            msg: "user created".to_string(),
        }),
    ))
}

/// Sign in and receive a session token
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    // Unknown username and wrong password get the same response so the
    // client cannot tell which part failed.
    let unauthorized = || ApiError::Unauthorized("authentication failed".to_string());

    let account = user::Entity::find()
        .filter(user::Column::Username.eq(payload.username.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(unauthorized)?;

    let matches = verify_password(&payload.password, &account.password_hash).map_err(|e| {
        tracing::error!("Password verification failed for '{}': {e}", account.username);
        ApiError::Internal
    })?;

    if !matches {
        return Err(unauthorized());
    }

    let claims = SessionClaims::with_default_validity(account.id, account.username.clone());
    let token = JwtValidator::encode(state.jwt_secret.as_bytes(), &claims).map_err(|e| {
        tracing::error!("Token issuance failed: {e}");
        ApiError::Internal
    })?;

    debug!("Issued session token for '{}'", account.username);

    Ok(Json(SigninResponse {
        success: true,
        token: format!("Bearer {token}"),
    }))
}

/// List the authenticated user's saved cities
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Saved cities", body = Vec<String>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "history"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<String>>, ApiError> {
    let cities = saved_city::Entity::find()
        .filter(saved_city::Column::UserId.eq(auth.user_id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|row| row.city)
        .collect();

    Ok(Json(cities))
}

/// Save a city to the authenticated user's history
#[utoipa::path(
    post,
    path = "/history",
    request_body = HistoryRequest,
    responses(
        (status = 201, description = "City saved", body = MessageResponse),
        (status = 400, description = "Missing city", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "City already saved", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "history"
)]
pub async fn add_city(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<HistoryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    require_field(&payload.city, "city")?;

    let entry = saved_city::ActiveModel {
        user_id: Set(auth.user_id),
        city: Set(payload.city.clone()),
        created_at: Set(Utc::now()),
    };

    // Composite primary key (user_id, city) enforces the set semantics.
    entry.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::Conflict("city already saved".to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ApiError::NotFound("user not found".to_string())
        }
        _ => ApiError::from(e),
    })?;

    debug!("User {} saved city '{}'", auth.username, payload.city);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            msg: "city saved".to_string(),
        }),
    ))
}

/// Remove a city from the authenticated user's history
#[utoipa::path(
    delete,
    path = "/history",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "City removed (idempotent)", body = MessageResponse),
        (status = 400, description = "Missing city", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_token" = [])),
    tag = "history"
)]
pub async fn remove_city(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<HistoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_field(&payload.city, "city")?;

    // Removing an absent city is not an error
    saved_city::Entity::delete_many()
        .filter(saved_city::Column::UserId.eq(auth.user_id))
        .filter(saved_city::Column::City.eq(payload.city.as_str()))
        .exec(&state.db)
        .await?;

    Ok(Json(MessageResponse {
        success: true,
        msg: "city deleted".to_string(),
    }))
}

/// Current weather for a city, served from the cache when fresh
#[utoipa::path(
    get,
    path = "/weather/{city}",
    params(
        ("city" = String, Path, description = "City name")
    ),
    responses(
        (status = 200, description = "Current weather", body = WeatherResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
        (status = 500, description = "Weather provider failure", body = ErrorResponse)
    ),
    tag = "weather"
)]
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let normalized = city.trim().to_lowercase();
    require_field(&normalized, "city")?;

    let cutoff = Utc::now() - Duration::minutes(WEATHER_CACHE_TTL_MINUTES);

    let cached = weather_report::Entity::find()
        .filter(weather_report::Column::City.eq(normalized.as_str()))
        .one(&state.db)
        .await?;

    if let Some(report) = cached {
        if report.fetched_at > cutoff {
            debug!("Serving cached weather for '{normalized}'");
            return Ok(Json(weather_response(report, true)));
        }
    }

    let observation = state.weather.current(&normalized).await?;

    // One search-log row per proxied lookup
    search::ActiveModel {
        id: Set(Uuid::new_v4()),
        city: Set(normalized.clone()),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    let response = WeatherResponse {
        success: true,
        city: normalized.clone(),
        weather_type: observation.weather_type,
        temperature: observation.temperature,
        description: observation.description,
        humidity: observation.humidity,
        wind_speed: observation.wind_speed,
        cached: false,
    };

    // Concurrent refreshes for the same city race at the unique key on
    // city; the upsert lets the last writer win instead of surfacing a
    // conflict on a GET.
    let report = weather_report::ActiveModel {
        id: Set(Uuid::new_v4()),
        city: Set(normalized.clone()),
        weather_type: Set(response.weather_type.clone()),
        temperature: Set(response.temperature),
        description: Set(response.description.clone()),
        humidity: Set(response.humidity),
        wind_speed: Set(response.wind_speed),
        fetched_at: Set(Utc::now()),
    };
    weather_report::Entity::insert(report)
        .on_conflict(
            OnConflict::column(weather_report::Column::City)
                .update_columns([
                    weather_report::Column::WeatherType,
                    weather_report::Column::Temperature,
                    weather_report::Column::Description,
                    weather_report::Column::Humidity,
                    weather_report::Column::WindSpeed,
                    weather_report::Column::FetchedAt,
                ])
                .to_owned(),
        )
        .exec(&state.db)
        .await?;

    info!("Fetched weather for '{normalized}' from provider");

    Ok(Json(response))
}

fn weather_response(report: weather_report::Model, cached: bool) -> WeatherResponse {
    WeatherResponse {
        success: true,
        city: report.city,
        weather_type: report.weather_type,
        temperature: report.temperature,
        description: report.description,
        humidity: report.humidity,
        wind_speed: report.wind_speed,
        cached,
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
