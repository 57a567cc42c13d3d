//! Mock-based tool tests using wiremock.
//!
//! These verify real tool behavior by mocking the OpenWeatherMap geocoding
//! and current-weather endpoints.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_mcp::client::OpenWeatherClient;
use weather_mcp::config::Config;
use weather_mcp::error::{ClientError, ToolError};
use weather_mcp::tools::{CompareWeatherTool, GetWeatherTool, McpTool, ToolContext, WeatherForecastTool};

/// Create a test context with a mock server.
fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = OpenWeatherClient::new(config).unwrap();
    ToolContext::new(Arc::new(client))
}

/// Mount a geocoding match for a city at the given coordinates.
async fn mock_geocode(server: &MockServer, query: &str, lat: f64, lon: f64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": lat, "lon": lon, "name": query, "country": "GB"}
        ])))
        .mount(server)
        .await;
}

/// Sample current-weather payload.
fn weather_payload(name: &str, temp: f64, humidity: u8) -> serde_json::Value {
    json!({
        "coord": {"lat": 51.51, "lon": -0.13},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": temp, "feels_like": temp - 0.5, "humidity": humidity, "pressure": 1014},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 80},
        "clouds": {"all": 40},
        "dt": 1_700_000_000,
        "sys": {"country": "GB", "sunrise": 1_699_946_400, "sunset": 1_699_979_100},
        "timezone": 0,
        "name": name
    })
}

/// Mount a current-weather response for the given latitude.
async fn mock_weather(server: &MockServer, lat: f64, payload: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", lat.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(server)
        .await;
}

// =============================================================================
// GetWeatherTool
// =============================================================================

#[tokio::test]
async fn test_get_weather_formats_report() {
    let mock_server = MockServer::start().await;
    mock_geocode(&mock_server, "London", 51.51, -0.13).await;
    mock_weather(&mock_server, 51.51, weather_payload("London", 18.26, 64)).await;

    let ctx = setup_test_context(&mock_server);
    let tool = GetWeatherTool;

    let result = tool.execute(&ctx, json!({"city": "London"})).await.unwrap();

    assert!(result.contains("Weather in London, GB"));
    assert!(result.contains("18.3°C"));
    assert!(result.contains("Humidity: 64%"));
    assert!(result.contains("Sunrise:"));
}

#[tokio::test]
async fn test_get_weather_passes_country_code_to_geocoder() {
    let mock_server = MockServer::start().await;
    // Geocoder must be asked for "Paris,FR", not bare "Paris".
    mock_geocode(&mock_server, "Paris,FR", 48.85, 2.35).await;
    mock_weather(&mock_server, 48.85, weather_payload("Paris", 21.0, 50)).await;

    let ctx = setup_test_context(&mock_server);
    let tool = GetWeatherTool;

    let result = tool
        .execute(&ctx, json!({"city": "Paris", "country_code": "FR"}))
        .await
        .unwrap();

    assert!(result.contains("Weather in Paris"));
}

#[tokio::test]
async fn test_get_weather_unknown_city_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let tool = GetWeatherTool;

    let err = tool.execute(&ctx, json!({"city": "Atlantis"})).await.unwrap_err();

    assert!(matches!(
        err,
        ToolError::Client(ClientError::CityNotFound { ref city }) if city == "Atlantis"
    ));
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_get_weather_missing_city_is_validation_error() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);
    let tool = GetWeatherTool;

    let err = tool.execute(&ctx, json!({})).await.unwrap_err();

    assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "city"));
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_get_weather_upstream_failure_is_upstream_error() {
    let mock_server = MockServer::start().await;
    mock_geocode(&mock_server, "London", 51.51, -0.13).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let tool = GetWeatherTool;

    let err = tool.execute(&ctx, json!({"city": "London"})).await.unwrap_err();

    assert!(matches!(err, ToolError::Client(ClientError::Status { status: 503, .. })));
    assert_eq!(err.http_status(), 500);
}

#[tokio::test]
async fn test_missing_api_key_is_configuration_error() {
    let mock_server = MockServer::start().await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.api_key = None;

    let client = OpenWeatherClient::new(config).unwrap();
    let ctx = ToolContext::new(Arc::new(client));
    let tool = GetWeatherTool;

    let err = tool.execute(&ctx, json!({"city": "London"})).await.unwrap_err();

    assert!(matches!(err, ToolError::Client(ClientError::ApiKeyMissing)));
    assert_eq!(err.http_status(), 500);
}

// =============================================================================
// CompareWeatherTool
// =============================================================================

#[tokio::test]
async fn test_compare_weather_reports_warmer_city() {
    let mock_server = MockServer::start().await;
    mock_geocode(&mock_server, "Lisbon", 38.72, -9.14).await;
    mock_geocode(&mock_server, "Oslo", 59.91, 10.75).await;
    mock_weather(&mock_server, 38.72, weather_payload("Lisbon", 20.0, 55)).await;
    mock_weather(&mock_server, 59.91, weather_payload("Oslo", 15.0, 70)).await;

    let ctx = setup_test_context(&mock_server);
    let tool = CompareWeatherTool;

    let result = tool
        .execute(&ctx, json!({"city1": "Lisbon", "city2": "Oslo"}))
        .await
        .unwrap();

    assert!(result.contains("Lisbon is 5.0°C warmer"));
    assert!(result.contains("Humidity difference: 15%"));
}

#[tokio::test]
async fn test_compare_weather_tie_names_second_city() {
    let mock_server = MockServer::start().await;
    mock_geocode(&mock_server, "Lisbon", 38.72, -9.14).await;
    mock_geocode(&mock_server, "Porto", 41.15, -8.61).await;
    mock_weather(&mock_server, 38.72, weather_payload("Lisbon", 20.0, 55)).await;
    mock_weather(&mock_server, 41.15, weather_payload("Porto", 20.0, 55)).await;

    let ctx = setup_test_context(&mock_server);
    let tool = CompareWeatherTool;

    let result = tool
        .execute(&ctx, json!({"city1": "Lisbon", "city2": "Porto"}))
        .await
        .unwrap();

    // Strict > comparison: an exact tie resolves to the second argument.
    assert!(result.contains("Porto is 0.0°C warmer"));
}

#[tokio::test]
async fn test_compare_weather_requires_both_cities() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);
    let tool = CompareWeatherTool;

    let err = tool.execute(&ctx, json!({"city1": "Lisbon"})).await.unwrap_err();
    assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "city2"));
}

// =============================================================================
// WeatherForecastTool
// =============================================================================

#[tokio::test]
async fn test_forecast_returns_placeholder() {
    let mock_server = MockServer::start().await;
    let ctx = setup_test_context(&mock_server);
    let tool = WeatherForecastTool;

    let result = tool.execute(&ctx, json!({"city": "Oslo", "days": 5})).await.unwrap();

    assert!(result.contains("coming soon"));
    assert!(result.contains("Oslo"));
}
