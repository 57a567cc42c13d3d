//! Weather data models.
//!
//! `WeatherRecord` is the normalized record handed to tools; the remaining
//! types mirror the OpenWeatherMap geocoding and current-weather payloads.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One match from the geocoding API (`/geo/1.0/direct`).
#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Current-weather payload (`/data/2.5/weather`).
///
/// Only the fields the record needs are modeled; the API sends more.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coordinates,
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: SysInfo,
    /// Shift from UTC in seconds, used for local sunrise/sunset times.
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Clouds {
    /// Cloud cover percentage.
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Normalized weather record, constructed per request and never cached.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    /// Current temperature in °C, rounded to one decimal.
    pub temperature: f64,
    /// Perceived temperature in °C, rounded to one decimal.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Atmospheric pressure in hPa.
    pub pressure: u32,
    /// Condition group (e.g. "Clouds").
    pub weather: String,
    /// Capitalized condition description (e.g. "Scattered clouds").
    pub description: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Wind direction in degrees.
    pub wind_direction: u16,
    /// Cloud cover in percent.
    pub clouds: u8,
    /// Visibility in meters, when reported.
    pub visibility: Option<u32>,
    /// Local sunrise time, HH:MM:SS.
    pub sunrise: String,
    /// Local sunset time, HH:MM:SS.
    pub sunset: String,
    /// Condition icon URL.
    pub icon: String,
    /// Observation time, ISO-8601 UTC.
    pub timestamp: String,
    pub coordinates: Coordinates,
}

impl WeatherRecord {
    /// Build a record from a current-weather payload.
    ///
    /// `requested_city` fills in when the payload omits a station name.
    #[must_use]
    pub fn from_current(response: &CurrentWeatherResponse, requested_city: &str) -> Self {
        let condition = response.weather.first();
        let offset = FixedOffset::east_opt(response.timezone)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));

        Self {
            city: response
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| requested_city.to_string()),
            country: response.sys.country.clone().unwrap_or_default(),
            temperature: round1(response.main.temp),
            feels_like: round1(response.main.feels_like),
            humidity: response.main.humidity,
            pressure: response.main.pressure,
            weather: condition.map(|c| c.main.clone()).unwrap_or_default(),
            description: condition.map(|c| capitalize(&c.description)).unwrap_or_default(),
            wind_speed: response.wind.speed,
            wind_direction: response.wind.deg,
            clouds: response.clouds.all,
            visibility: response.visibility,
            sunrise: local_hms(response.sys.sunrise, offset),
            sunset: local_hms(response.sys.sunset, offset),
            icon: condition
                .map(|c| format!("https://openweathermap.org/img/wn/{}@2x.png", c.icon))
                .unwrap_or_default(),
            timestamp: DateTime::<Utc>::from_timestamp(response.dt, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            coordinates: response.coord,
        }
    }
}

/// Format a unix timestamp as HH:MM:SS in the given local offset.
fn local_hms(unix: i64, offset: FixedOffset) -> String {
    DateTime::<Utc>::from_timestamp(unix, 0)
        .map(|t| t.with_timezone(&offset).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Uppercase the first character, matching upstream description casing.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
