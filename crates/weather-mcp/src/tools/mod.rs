//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its input parameters
//! 2. Calls the OpenWeatherMap client
//! 3. Formats the result as a text block

mod weather;

pub use weather::*;

use std::sync::Arc;

use crate::client::OpenWeatherClient;
use crate::error::ToolResult;

/// Tool execution context.
pub struct ToolContext {
    /// Weather API client.
    pub client: Arc<OpenWeatherClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<OpenWeatherClient>) -> Self {
        Self { client }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g. "get_weather").
    fn name(&self) -> &'static str;

    /// Tool description for the caller's tool picker.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(weather::GetWeatherTool),
        Box::new(weather::WeatherForecastTool),
        Box::new(weather::CompareWeatherTool),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_stable() {
        let tools = register_all_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();

        assert_eq!(names, vec!["get_weather", "get_weather_forecast", "compare_weather"]);
    }

    #[test]
    fn test_every_tool_declares_required_fields() {
        for tool in register_all_tools() {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{} schema must be an object", tool.name());
            assert!(
                schema["required"].as_array().is_some_and(|r| !r.is_empty()),
                "{} must declare required fields",
                tool.name()
            );
        }
    }
}
