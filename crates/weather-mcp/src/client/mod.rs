//! OpenWeatherMap API client.
//!
//! Two sequential remote calls back every lookup: geocode the city name,
//! then fetch current weather for the coordinates. Each call runs with a
//! bounded timeout and no retries; records are built per request and never
//! cached.

use reqwest::Client;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{CurrentWeatherResponse, GeoMatch, WeatherRecord};

/// Result of the upstream health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    /// Probe request returned a success status.
    Working,
    /// Probe request failed or returned a non-success status.
    Error,
    /// No API key configured, probe skipped.
    NotConfigured,
}

impl UpstreamStatus {
    /// Stable string form used in the /health payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Error => "error",
            Self::NotConfigured => "not_configured",
        }
    }
}

/// OpenWeatherMap API client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,

    /// Separate client for the health probe, with a shorter timeout.
    probe_client: Client,

    api_key: Option<String>,

    weather_api_url: String,

    geo_api_url: String,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let probe_client = Client::builder()
            .timeout(config.probe_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            probe_client,
            api_key: config.api_key,
            weather_api_url: config.weather_api_url,
            geo_api_url: config.geo_api_url,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current weather for a city.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ApiKeyMissing`] when no key is configured
    /// - [`ClientError::CityNotFound`] when geocoding finds no match
    /// - [`ClientError::Http`] / [`ClientError::Status`] on upstream failure
    pub async fn fetch(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> ClientResult<WeatherRecord> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::ApiKeyMissing)?;

        let location = match country_code.filter(|c| !c.is_empty()) {
            Some(code) => format!("{city},{code}"),
            None => city.to_string(),
        };

        let geo = self.geocode(&location, api_key).await?;
        let Some(geo) = geo else {
            return Err(ClientError::city_not_found(city));
        };

        tracing::debug!(city = %city, lat = geo.lat, lon = geo.lon, "Geocoded city");

        let response = self
            .client
            .get(format!("{}/weather", self.weather_api_url))
            .query(&[
                ("lat", geo.lat.to_string()),
                ("lon", geo.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
                ("lang", "en".to_string()),
            ])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let payload: CurrentWeatherResponse = response.json().await?;

        Ok(WeatherRecord::from_current(&payload, city))
    }

    /// Probe the upstream API for the health endpoint.
    ///
    /// Never fails: the outcome is folded into an [`UpstreamStatus`].
    pub async fn probe(&self) -> UpstreamStatus {
        let Some(ref api_key) = self.api_key else {
            return UpstreamStatus::NotConfigured;
        };

        let result = self
            .probe_client
            .get(format!("{}/weather", self.weather_api_url))
            .query(&[("q", "London"), ("appid", api_key)])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => UpstreamStatus::Working,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Upstream probe returned error status");
                UpstreamStatus::Error
            }
            Err(e) => {
                tracing::warn!(error = %e, "Upstream probe failed");
                UpstreamStatus::Error
            }
        }
    }

    /// Resolve a location string to coordinates, best match only.
    async fn geocode(&self, location: &str, api_key: &str) -> ClientResult<Option<GeoMatch>> {
        let response = self
            .client
            .get(format!("{}/direct", self.geo_api_url))
            .query(&[("q", location), ("limit", "1"), ("appid", api_key)])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let mut matches: Vec<GeoMatch> = response.json().await?;

        Ok(if matches.is_empty() { None } else { Some(matches.remove(0)) })
    }

    /// Map non-success statuses to the single upstream-error condition.
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ClientError::status(status.as_u16(), message))
    }
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient").field("has_api_key", &self.has_api_key()).finish()
    }
}
