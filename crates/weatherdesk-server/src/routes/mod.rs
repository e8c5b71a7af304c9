mod auth;
mod home;
mod weather;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

use crate::auth::middleware::attach_session;
use crate::auth::session::{RandomTokenGenerator, TokenGenerator};
use crate::config::Config;
use crate::error::AppError;
use crate::services::weather::WeatherClient;
use crate::store::{CredentialStore, MemoryStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<dyn TokenGenerator>,
    pub weather: WeatherClient,
}

impl AppState {
    /// Wire the in-memory store and the weatherstack client from `config`.
    pub fn new(config: Config) -> Self {
        let store = MemoryStore::new();
        let weather = WeatherClient::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
        );

        Self {
            credentials: Arc::new(store.clone()),
            sessions: Arc::new(store),
            tokens: Arc::new(RandomTokenGenerator),
            weather,
            config,
        }
    }
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route(
            "/",
            get(home::index)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/signup",
            get(auth::signup_form)
                .post(auth::signup)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/login",
            get(auth::login_form)
                .post(auth::login)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/logout",
            get(auth::logout)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/weather",
            get(weather::lookup)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            attach_session,
        ))
        .nest_service("/static", static_files)
        .with_state(state)
}
