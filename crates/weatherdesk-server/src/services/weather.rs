use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::WeatherReport;

const RATE_LIMIT_TYPE: &str = "rate_limit_reached";

pub const RATE_LIMIT_MESSAGE: &str = "Weather API request limit reached. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please check your input.";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("missing city or API key")]
    MissingInput,

    #[error("weather request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read weather response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("weather response is not JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unexpected weather response shape: {0}")]
    Decode(String),

    #[error("{msg}", msg = RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// Any other upstream error object; carries the reported `type`.
    #[error("{msg}", msg = NOT_FOUND_MESSAGE)]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
    location: Location,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature: f64,
    weather_descriptions: Vec<String>,
    humidity: f64,
    wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
    country: String,
}

/// Client for the weatherstack `current` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Fetch current conditions for `city`.
    /// Empty input is rejected before any request goes out.
    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        if city.is_empty() || api_key.is_empty() {
            return Err(WeatherError::MissingInput);
        }

        let url = format!("{}/current", self.base_url.trim_end_matches('/'));
        let body = self
            .http
            .get(&url)
            .query(&[("access_key", api_key), ("query", city)])
            .send()
            .await
            .map_err(WeatherError::Transport)?
            .text()
            .await
            .map_err(WeatherError::Body)?;

        tracing::debug!("Weather API response for {city}: {body}");

        let report = parse_report(&body)?;
        tracing::debug!("Weather report for {city}: {report:?}");
        Ok(report)
    }
}

/// Decode a weatherstack response body into a report.
pub fn parse_report(body: &str) -> Result<WeatherReport, WeatherError> {
    let value: Value = serde_json::from_str(body).map_err(WeatherError::InvalidJson)?;

    if let Some(api_error) = value.get("error").filter(|e| !e.is_null()) {
        tracing::warn!("Error in weather API response: {api_error}");
        let kind = api_error
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if kind == RATE_LIMIT_TYPE {
            return Err(WeatherError::RateLimited);
        }
        return Err(WeatherError::NotFound(kind.to_string()));
    }

    let decoded: CurrentResponse =
        serde_json::from_value(value).map_err(|e| WeatherError::Decode(e.to_string()))?;

    let weather = decoded
        .current
        .weather_descriptions
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Decode("weather_descriptions is empty".to_string()))?;

    Ok(WeatherReport {
        city: format!("{}, {}", decoded.location.name, decoded.location.country),
        temperature: format!("{:.1}°C", decoded.current.temperature),
        weather,
        humidity: format!("{}%", decoded.current.humidity),
        wind_speed: format!("{} km/h", decoded.current.wind_speed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paris() -> serde_json::Value {
        serde_json::json!({
            "current": {
                "temperature": 21.5,
                "weather_descriptions": ["Sunny"],
                "humidity": 40,
                "wind_speed": 10
            },
            "location": {"name": "Paris", "country": "France"}
        })
    }

    #[test]
    fn parses_a_successful_response() {
        let report = parse_report(&paris().to_string()).unwrap();

        assert_eq!(report.city, "Paris, France");
        assert_eq!(report.temperature, "21.5°C");
        assert_eq!(report.weather, "Sunny");
        assert_eq!(report.humidity, "40%");
        assert_eq!(report.wind_speed, "10 km/h");
    }

    #[test]
    fn temperature_is_rounded_to_one_decimal() {
        let mut body = paris();
        body["current"]["temperature"] = serde_json::json!(7);
        assert_eq!(parse_report(&body.to_string()).unwrap().temperature, "7.0°C");

        body["current"]["temperature"] = serde_json::json!(-3.26);
        assert_eq!(parse_report(&body.to_string()).unwrap().temperature, "-3.3°C");
    }

    #[test]
    fn fractional_wind_speed_keeps_its_digits() {
        let mut body = paris();
        body["current"]["wind_speed"] = serde_json::json!(12.5);
        assert_eq!(parse_report(&body.to_string()).unwrap().wind_speed, "12.5 km/h");
    }

    #[test]
    fn rate_limit_error_is_recognized() {
        let body = r#"{"error":{"type":"rate_limit_reached"}}"#;
        assert!(matches!(parse_report(body), Err(WeatherError::RateLimited)));
    }

    #[test]
    fn other_api_errors_mean_not_found() {
        let body = r#"{"error":{"type":"anything_else"}}"#;
        match parse_report(body) {
            Err(WeatherError::NotFound(kind)) => assert_eq!(kind, "anything_else"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let untyped = r#"{"error":{"code":615}}"#;
        assert!(matches!(parse_report(untyped), Err(WeatherError::NotFound(_))));
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        assert!(matches!(parse_report("not json"), Err(WeatherError::InvalidJson(_))));

        let missing_location = r#"{"current":{"temperature":1.0,"weather_descriptions":["Fog"],"humidity":1,"wind_speed":1}}"#;
        assert!(matches!(parse_report(missing_location), Err(WeatherError::Decode(_))));

        let mut wrong_type = paris();
        wrong_type["current"]["temperature"] = serde_json::json!("warm");
        assert!(matches!(
            parse_report(&wrong_type.to_string()),
            Err(WeatherError::Decode(_))
        ));

        let mut no_descriptions = paris();
        no_descriptions["current"]["weather_descriptions"] = serde_json::json!([]);
        assert!(matches!(
            parse_report(&no_descriptions.to_string()),
            Err(WeatherError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn fetch_sends_key_and_city_as_query_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .and(query_param("access_key", "secret"))
            .and(query_param("query", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(paris()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), Some("secret".to_string()));
        let report = client.fetch("New York").await.unwrap();

        assert_eq!(report.city, "Paris, France");
    }

    #[tokio::test]
    async fn empty_city_never_reaches_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(paris()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), Some("secret".to_string()));
        assert!(matches!(client.fetch("").await, Err(WeatherError::MissingInput)));
    }

    #[tokio::test]
    async fn missing_key_never_reaches_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(paris()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = WeatherClient::new(mock_server.uri(), None);
        assert!(matches!(client.fetch("Paris").await, Err(WeatherError::MissingInput)));

        let blank = WeatherClient::new(mock_server.uri(), Some(String::new()));
        assert!(matches!(blank.fetch("Paris").await, Err(WeatherError::MissingInput)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        let client = WeatherClient::new("http://127.0.0.1:1", Some("secret".to_string()));
        assert!(matches!(client.fetch("Paris").await, Err(WeatherError::Transport(_))));
    }
}
