//! Text output formatting for tool results.
//!
//! Tools return human-readable text blocks; the templates here mirror what
//! the BI dashboard renders verbatim.

use crate::models::WeatherRecord;

/// Format a weather record as the multi-line report block.
#[must_use]
pub fn format_weather_report(record: &WeatherRecord) -> String {
    let mut output = format!(
        "🌤️ **Weather in {}, {}**\n\n\
         **Current Conditions:**\n\
         • Temperature: {}°C (feels like {}°C)\n\
         • Weather: {} ({})\n\
         • Humidity: {}%\n\
         • Pressure: {} hPa\n\
         • Wind: {} m/s at {}°\n\
         • Cloud cover: {}%\n",
        record.city,
        record.country,
        record.temperature,
        record.feels_like,
        record.weather,
        record.description,
        record.humidity,
        record.pressure,
        record.wind_speed,
        record.wind_direction,
        record.clouds,
    );

    if let Some(visibility) = record.visibility {
        output.push_str(&format!("• Visibility: {visibility} m\n"));
    }

    output.push_str(&format!(
        "\n**Today:**\n\
         • Sunrise: {}\n\
         • Sunset: {}",
        record.sunrise, record.sunset,
    ));

    output
}

/// Format the two-city comparison block.
///
/// The warmer city is picked by strict `>` on temperature, so an exact tie
/// names the second city.
#[must_use]
pub fn format_weather_comparison(first: &WeatherRecord, second: &WeatherRecord) -> String {
    let warmer = if first.temperature > second.temperature { first } else { second };
    let temp_diff = (first.temperature - second.temperature).abs();
    let humidity_diff = first.humidity.abs_diff(second.humidity);

    format!(
        "🌡️ **Weather Comparison**\n\n\
         **{}:**\n\
         • Temperature: {}°C\n\
         • Conditions: {}\n\
         • Humidity: {}%\n\n\
         **{}:**\n\
         • Temperature: {}°C\n\
         • Conditions: {}\n\
         • Humidity: {}%\n\n\
         **Comparison:**\n\
         • {} is {:.1}°C warmer\n\
         • Humidity difference: {}%",
        first.city,
        first.temperature,
        first.weather,
        first.humidity,
        second.city,
        second.temperature,
        second.weather,
        second.humidity,
        warmer.city,
        temp_diff,
        humidity_diff,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn record(city: &str, temperature: f64, humidity: u8) -> WeatherRecord {
        WeatherRecord {
            city: city.to_string(),
            country: "GB".to_string(),
            temperature,
            feels_like: temperature - 1.0,
            humidity,
            pressure: 1013,
            weather: "Clear".to_string(),
            description: "Clear sky".to_string(),
            wind_speed: 3.2,
            wind_direction: 180,
            clouds: 5,
            visibility: Some(10_000),
            sunrise: "06:45:00".to_string(),
            sunset: "19:30:00".to_string(),
            icon: "https://openweathermap.org/img/wn/01d@2x.png".to_string(),
            timestamp: "2025-06-01T12:00:00+00:00".to_string(),
            coordinates: Coordinates { lat: 0.0, lon: 0.0 },
        }
    }

    #[test]
    fn test_report_includes_all_sections() {
        let output = format_weather_report(&record("London", 18.3, 64));

        assert!(output.contains("Weather in London, GB"));
        assert!(output.contains("18.3°C"));
        assert!(output.contains("Humidity: 64%"));
        assert!(output.contains("Pressure: 1013 hPa"));
        assert!(output.contains("Visibility: 10000 m"));
        assert!(output.contains("Sunrise: 06:45:00"));
        assert!(output.contains("Sunset: 19:30:00"));
    }

    #[test]
    fn test_report_omits_missing_visibility() {
        let mut rec = record("London", 18.3, 64);
        rec.visibility = None;

        assert!(!format_weather_report(&rec).contains("Visibility"));
    }

    #[test]
    fn test_comparison_reports_warmer_city_and_deltas() {
        let output =
            format_weather_comparison(&record("Lisbon", 20.0, 55), &record("Oslo", 15.0, 70));

        assert!(output.contains("Lisbon is 5.0°C warmer"));
        assert!(output.contains("Humidity difference: 15%"));
    }

    #[test]
    fn test_comparison_tie_names_second_city() {
        let output =
            format_weather_comparison(&record("Lisbon", 20.0, 55), &record("Porto", 20.0, 55));

        assert!(output.contains("Porto is 0.0°C warmer"));
    }
}
