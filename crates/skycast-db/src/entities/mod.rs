//! Database entities

pub mod saved_city;
pub mod search;
pub mod user;
pub mod weather_report;

pub use saved_city::Entity as SavedCity;
pub use search::Entity as Search;
pub use user::Entity as User;
pub use weather_report::Entity as WeatherReport;

pub mod prelude {
    pub use super::saved_city::Entity as SavedCity;
    pub use super::search::Entity as Search;
    pub use super::user::Entity as User;
    pub use super::weather_report::Entity as WeatherReport;
}
