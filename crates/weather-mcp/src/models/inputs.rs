//! Input models for MCP tool parameters.

use serde::{Deserialize, Serialize};

/// Input for the `get_weather` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWeatherInput {
    /// City name (e.g. "London").
    #[serde(default)]
    pub city: Option<String>,

    /// Optional ISO country code to disambiguate (e.g. "GB").
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Input for the `compare_weather` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareWeatherInput {
    /// First city.
    #[serde(default)]
    pub city1: Option<String>,

    /// Second city.
    #[serde(default)]
    pub city2: Option<String>,
}

/// Input for the `get_weather_forecast` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecastInput {
    /// City name.
    #[serde(default)]
    pub city: Option<String>,

    /// Number of forecast days (1-5).
    #[serde(default = "default_forecast_days")]
    pub days: u8,
}

fn default_forecast_days() -> u8 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_weather_input_defaults() {
        let input: GetWeatherInput = serde_json::from_value(json!({"city": "Paris"})).unwrap();
        assert_eq!(input.city.as_deref(), Some("Paris"));
        assert!(input.country_code.is_none());
    }

    #[test]
    fn test_forecast_days_default() {
        let input: WeatherForecastInput =
            serde_json::from_value(json!({"city": "Oslo"})).unwrap();
        assert_eq!(input.days, 3);
    }

    #[test]
    fn test_missing_fields_parse_to_none() {
        let input: CompareWeatherInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.city1.is_none());
        assert!(input.city2.is_none());
    }
}
