use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::weather::WeatherError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Invalid request method".to_string(),
            ),
            AppError::Weather(e) => weather_status(e),
        };

        (status, message).into_response()
    }
}

fn weather_status(err: &WeatherError) -> (StatusCode, String) {
    match err {
        WeatherError::MissingInput => {
            (StatusCode::BAD_REQUEST, "Missing city or API key".to_string())
        }
        WeatherError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, err.to_string()),
        WeatherError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        WeatherError::Transport(_) => upstream_failure(err, "Failed to fetch weather"),
        WeatherError::Body(_) => upstream_failure(err, "Failed to read weather data"),
        WeatherError::InvalidJson(_) | WeatherError::Decode(_) => {
            upstream_failure(err, "Failed to decode weather data")
        }
    }
}

fn upstream_failure(err: &WeatherError, message: &str) -> (StatusCode, String) {
    tracing::error!("Weather lookup failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
}

pub type AppResult<T> = Result<T, AppError>;
