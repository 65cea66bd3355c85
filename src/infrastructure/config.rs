use crate::domain::forecast::DEFAULT_FORECAST_DAYS;
use serde::Deserialize;
use std::collections::HashMap;

/// Placeholder key for local runs. Deployments set `OPENWEATHER_API_KEY`.
pub const DEFAULT_API_KEY: &str = "replace-with-openweather-api-key";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub weather: WeatherSettings,
    pub maps: MapsSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: String,
    pub units: String,
    pub timeout_secs: u64,
    pub forecast_days: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapsSettings {
    /// URL template, `${location}` is replaced with the encoded location
    pub search_url: String,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults, then `config/app.*` if present, then `APP__SECTION__KEY` variables,
/// then the conventional `OPENWEATHER_API_KEY` and `DATABASE_URL`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(config::Environment::with_prefix("APP").prefix_separator("__").separator("__"))
        .set_override_option("weather.api_key", std::env::var("OPENWEATHER_API_KEY").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "sqlite://weather.db")?
        .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
        .set_default("weather.api_key", DEFAULT_API_KEY)?
        .set_default("weather.units", "metric")?
        .set_default("weather.timeout_secs", 10)?
        .set_default("weather.forecast_days", DEFAULT_FORECAST_DAYS as i64)?
        .set_default("maps.search_url", "https://www.google.com/maps/search/${location}")?)
}

/// Replace template variables in a string
pub fn prepare_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
