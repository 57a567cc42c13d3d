//! Configuration for the weather MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenWeatherMap current-weather API.
    pub const WEATHER_API: &str = "https://api.openweathermap.org/data/2.5";

    /// Base URL for the OpenWeatherMap geocoding API.
    pub const GEO_API: &str = "http://api.openweathermap.org/geo/1.0";

    /// Per-request timeout for weather lookups.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for the health-check probe (kept short so /health stays snappy).
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
}

/// OAuth configuration constants.
pub mod oauth {
    /// Authorization code lifetime: 10 minutes.
    pub const AUTH_CODE_TTL_SECS: u64 = 600;

    /// Access token lifetime reported to clients: 1 hour.
    pub const ACCESS_TOKEN_TTL_SECS: u64 = 3600;

    /// Scope granted to dynamically registered clients.
    pub const DEFAULT_SCOPE: &str = "weather:read";
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key (optional; lookups fail without it).
    pub api_key: Option<String>,

    /// Base URL for the current-weather API (overridable for mock servers).
    pub weather_api_url: String,

    /// Base URL for the geocoding API (overridable for mock servers).
    pub geo_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Health-probe timeout.
    pub probe_timeout: Duration,

    /// Pre-provisioned OAuth client id, registered at startup.
    pub seed_client_id: Option<String>,

    /// Secret for the pre-provisioned OAuth client.
    pub seed_client_secret: Option<String>,

    /// Redirect URI allowed for the pre-provisioned OAuth client.
    pub seed_redirect_uri: Option<String>,
}

impl Config {
    /// Create a new configuration with an optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            weather_api_url: api::WEATHER_API.to_string(),
            geo_api_url: api::GEO_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            probe_timeout: api::PROBE_TIMEOUT,
            seed_client_id: None,
            seed_client_secret: None,
            seed_redirect_uri: None,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some("test-api-key".to_string()),
            weather_api_url: format!("{base_url}/data/2.5"),
            geo_api_url: format!("{base_url}/geo/1.0"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            probe_timeout: Duration::from_secs(2),
            seed_client_id: None,
            seed_client_secret: None,
            seed_redirect_uri: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        let mut config = Self::new(api_key);
        config.seed_client_id = std::env::var("MCP_SEED_CLIENT_ID").ok();
        config.seed_client_secret = std::env::var("MCP_SEED_CLIENT_SECRET").ok();
        config.seed_redirect_uri = std::env::var("MCP_SEED_REDIRECT_URI").ok();
        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_with_api_key() {
        let config = Config::new(Some("test-key".to_string()));
        assert!(config.has_api_key());
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_for_testing_points_at_mock() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.weather_api_url, "http://127.0.0.1:9999/data/2.5");
        assert_eq!(config.geo_api_url, "http://127.0.0.1:9999/geo/1.0");
        assert!(config.has_api_key());
    }
}
