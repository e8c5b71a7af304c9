#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Display-ready weather for one city. Every field is already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub weather: String,
    pub humidity: String,
    pub wind_speed: String,
}
