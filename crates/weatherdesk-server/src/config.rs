use std::env;

use anyhow::Context;

pub const DEFAULT_WEATHER_API_URL: &str = "http://api.weatherstack.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub weather_api_url: String,
    pub weather_api_key: Option<String>,
    pub static_dir: String,
    pub sessions_enabled: bool,
    pub secure_cookies: bool,
    pub google_cloud_project: Option<String>,
    pub firestore_credentials_file: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string()),
            weather_api_key: non_empty_var("WEATHER_API_KEY"),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            sessions_enabled: flag("SESSIONS_ENABLED", true),
            secure_cookies: flag("SECURE_COOKIES", false),
            google_cloud_project: non_empty_var("GOOGLE_CLOUD_PROJECT"),
            firestore_credentials_file: non_empty_var("FIRESTORE_CREDENTIALS_FILE"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            weather_api_key: None,
            static_dir: "static".to_string(),
            sessions_enabled: true,
            secure_cookies: false,
            google_cloud_project: None,
            firestore_credentials_file: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn flag(key: &str, default: bool) -> bool {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse_flag(&raw).unwrap_or_else(|| {
        tracing::warn!("{key}={raw:?} is not a boolean, using {default}");
        default
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
