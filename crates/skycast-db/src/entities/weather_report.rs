//! Cached weather report entity
//!
//! One row per normalized (lowercased) city; a row fresher than the API's
//! cache TTL is served instead of calling the provider.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Normalized (lowercased) city name
    #[sea_orm(unique)]
    pub city: String,

    /// Provider weather group, e.g. "Clear", "Rain", "Clouds"
    pub weather_type: String,

    /// Temperature in Celsius
    pub temperature: f64,

    /// Free-text description, e.g. "light rain"
    pub description: Option<String>,

    /// Relative humidity percentage (0-100)
    pub humidity: Option<i32>,

    /// Wind speed in m/s
    pub wind_speed: Option<f64>,

    /// When the provider was last queried for this city
    pub fetched_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
