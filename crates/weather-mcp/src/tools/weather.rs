//! Weather tools: get_weather, get_weather_forecast, compare_weather.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{CompareWeatherInput, GetWeatherInput, WeatherForecastInput};

/// Current-weather lookup tool.
pub struct GetWeatherTool;

#[async_trait::async_trait]
impl McpTool for GetWeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> &'static str {
        "Get current weather for a city"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name (e.g., 'London')"
                },
                "country_code": {
                    "type": "string",
                    "description": "Optional country code",
                    "default": ""
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: GetWeatherInput = serde_json::from_value(input)?;

        let city = require(params.city.as_deref(), "city")?;
        let record = ctx.client.fetch(city, params.country_code.as_deref()).await?;

        Ok(formatters::format_weather_report(&record))
    }
}

/// Forecast tool. Declared in the catalog but not backed by a forecast
/// endpoint yet; callers get a fixed placeholder.
pub struct WeatherForecastTool;

#[async_trait::async_trait]
impl McpTool for WeatherForecastTool {
    fn name(&self) -> &'static str {
        "get_weather_forecast"
    }

    fn description(&self) -> &'static str {
        "Get weather forecast for a city"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name"
                },
                "days": {
                    "type": "integer",
                    "description": "Number of forecast days (1-5)",
                    "default": 3
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, _ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: WeatherForecastInput = serde_json::from_value(input)?;
        let city = require(params.city.as_deref(), "city")?;

        Ok(format!("📅 Weather forecast for {city} is coming soon."))
    }
}

/// Two-city comparison tool.
pub struct CompareWeatherTool;

#[async_trait::async_trait]
impl McpTool for CompareWeatherTool {
    fn name(&self) -> &'static str {
        "compare_weather"
    }

    fn description(&self) -> &'static str {
        "Compare weather between two cities"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "city1": {
                    "type": "string",
                    "description": "First city"
                },
                "city2": {
                    "type": "string",
                    "description": "Second city"
                }
            },
            "required": ["city1", "city2"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: CompareWeatherInput = serde_json::from_value(input)?;

        let city1 = require(params.city1.as_deref(), "city1")?;
        let city2 = require(params.city2.as_deref(), "city2")?;

        let first = ctx.client.fetch(city1, None).await?;
        let second = ctx.client.fetch(city2, None).await?;

        Ok(formatters::format_weather_comparison(&first, &second))
    }
}

/// Reject missing or empty required string fields.
fn require<'a>(value: Option<&'a str>, field: &str) -> ToolResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ToolError::validation(field, "parameter is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty() {
        assert!(require(Some("London"), "city").is_ok());
        assert!(require(Some("  "), "city").is_err());
        assert!(require(None, "city").is_err());
    }
}
