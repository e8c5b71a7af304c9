use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::routes::AppState;
use crate::services::weather::{WeatherError, NOT_FOUND_MESSAGE, RATE_LIMIT_MESSAGE};
use crate::views;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

/// GET /weather?city=Paris
///
/// Errors reported by the weather API itself render the error page; transport
/// and decode failures surface as plain error responses.
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Response> {
    match state.weather.fetch(&query.city).await {
        Ok(report) => Ok(views::weather_result(&report).into_response()),
        Err(WeatherError::RateLimited) => {
            tracing::warn!("Weather API rate limit reached");
            Ok((StatusCode::TOO_MANY_REQUESTS, views::error_page(RATE_LIMIT_MESSAGE)).into_response())
        }
        Err(WeatherError::NotFound(kind)) => {
            tracing::info!("Weather API returned {kind:?} for {:?}", query.city);
            Ok((StatusCode::NOT_FOUND, views::error_page(NOT_FOUND_MESSAGE)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
