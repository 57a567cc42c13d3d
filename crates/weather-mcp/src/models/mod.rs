//! Data models: the normalized weather record, upstream API payloads,
//! and tool input parameters.

mod inputs;
mod weather;

pub use inputs::{CompareWeatherInput, GetWeatherInput, WeatherForecastInput};
pub use weather::{
    Clouds, Coordinates, CurrentWeatherResponse, GeoMatch, MainReadings, SysInfo, WeatherCondition,
    WeatherRecord, Wind,
};
