//! Error types for the weather MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the OpenWeatherMap client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// No API key configured (500 for the caller).
    #[error("OpenWeatherMap API key not configured")]
    ApiKeyMissing,

    /// Geocoding returned no match for the requested city (404).
    #[error("city '{city}' not found")]
    CityNotFound {
        /// City name as the caller supplied it
        city: String,
    },

    /// HTTP transport error (connection, DNS, TLS, timeout).
    #[error("weather API unavailable: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the upstream API.
    #[error("weather API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error on an upstream payload.
    #[error("failed to parse weather API response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a not-found error for a city.
    #[must_use]
    pub fn city_not_found(city: impl Into<String>) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// Create an upstream status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// HTTP status this error maps to at the service boundary.
    ///
    /// Transport faults and upstream failures collapse to a single
    /// "upstream unavailable" 500 condition.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::CityNotFound { .. } => 404,
            Self::ApiKeyMissing | Self::Http(_) | Self::Status { .. } | Self::Parse(_) => 500,
        }
    }
}

/// Errors from MCP tool dispatch and execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the weather client
    #[error("weather API error: {0}")]
    Client(#[from] ClientError),

    /// Input validation failed
    #[error("invalid input for '{field}': {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Tool name not present in the registry
    #[error("tool '{name}' not found")]
    UnknownTool {
        /// Requested tool name
        name: String,
    },

    /// JSON serialization/deserialization error on tool arguments
    #[error("invalid tool arguments: {0}")]
    Arguments(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create an unknown-tool error.
    #[must_use]
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// HTTP status this error maps to at the service boundary.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Client(e) => e.http_status(),
            Self::Validation { .. } | Self::Arguments(_) => 400,
            Self::UnknownTool { .. } => 404,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status_mapping() {
        assert_eq!(ClientError::ApiKeyMissing.http_status(), 500);
        assert_eq!(ClientError::city_not_found("Atlantis").http_status(), 404);
        assert_eq!(ClientError::status(502, "bad gateway").http_status(), 500);
    }

    #[test]
    fn test_tool_error_status_mapping() {
        assert_eq!(ToolError::validation("city", "required").http_status(), 400);
        assert_eq!(ToolError::unknown_tool("get_stock_price").http_status(), 404);
        assert_eq!(
            ToolError::Client(ClientError::city_not_found("Atlantis")).http_status(),
            404
        );
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = ToolError::unknown_tool("frobnicate");
        assert!(err.to_string().contains("frobnicate"));

        let err = ClientError::city_not_found("Springfield");
        assert!(err.to_string().contains("Springfield"));
    }
}
