use std::{env, fs};
use log::{info, LevelFilter};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DBConfig {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct OpenWeather {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default = "default_hourly_count")]
    pub hourly_count: usize,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Fixed display offset in seconds east of UTC, the place's own offset is used if absent
    pub utc_offset_secs: Option<i32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            hourly_count: default_hourly_count(),
            forecast_days: default_forecast_days(),
            recent_limit: default_recent_limit(),
            utc_offset_secs: None,
        }
    }
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub web_server: WebServer,
    pub db: DBConfig,
    pub open_weather: OpenWeather,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_log_level() -> String { "info".to_string() }
fn default_base_url() -> String { "https://api.openweathermap.org/data/2.5".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_city() -> String { "London".to_string() }
fn default_hourly_count() -> usize { crate::forecast::HOURLY_COUNT }
fn default_forecast_days() -> usize { 5 }
fn default_recent_limit() -> usize { 5 }

/// Loads the configuration and sets up logging
///
/// The config file path is taken from the first command line argument, "config.toml" if not given.
///
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::args().nth(1).unwrap_or("config.toml".to_string());
    let toml = fs::read_to_string(&config_path)?;
    let config = parse_config(&toml)?;

    let level = config.general.log_level.parse::<LevelFilter>()
        .map_err(|e| ConfigError(format!("log_level {}: {}", config.general.log_level, e)))?;
    setup_logger(&config.general.log_path, level, config.general.log_to_stdout)?;

    info!("configuration loaded from {}", config_path);
    Ok(config)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a toml string
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.open_weather.api_key.trim().is_empty() {
        return Err("open_weather.api_key must be set".into());
    }
    let dashboard = &config.dashboard;
    if dashboard.hourly_count == 0 {
        return Err("dashboard.hourly_count must be at least 1".into());
    }
    if dashboard.forecast_days == 0 {
        return Err("dashboard.forecast_days must be at least 1".into());
    }
    if dashboard.recent_limit == 0 {
        return Err("dashboard.recent_limit must be at least 1".into());
    }
    if dashboard.utc_offset_secs.is_some_and(|o| o.abs() >= 86_400) {
        return Err("dashboard.utc_offset_secs must be less than a day".into());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [general]
        log_path = "weatherdash.log"

        [web_server]
        bind_address = "127.0.0.1"
        bind_port = 8080

        [db]
        db_path = "weatherdash.db"

        [open_weather]
        api_key = "secret"
    "#;

    #[test]
    fn test_defaults() {
        let config = parse_config(MINIMAL).unwrap();

        assert_eq!(config.general.log_level, "info");
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.open_weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.open_weather.timeout_secs, 30);
        assert_eq!(config.dashboard.default_city, "London");
        assert_eq!(config.dashboard.hourly_count, 8);
        assert_eq!(config.dashboard.forecast_days, 5);
        assert_eq!(config.dashboard.recent_limit, 5);
        assert_eq!(config.dashboard.utc_offset_secs, None);
    }

    #[test]
    fn test_dashboard_section() {
        let toml = format!("{}\n[dashboard]\ndefault_city = \"Oslo\"\nhourly_count = 4\nutc_offset_secs = 3600\n", MINIMAL);
        let config = parse_config(&toml).unwrap();

        assert_eq!(config.dashboard.default_city, "Oslo");
        assert_eq!(config.dashboard.hourly_count, 4);
        assert_eq!(config.dashboard.forecast_days, 5);
        assert_eq!(config.dashboard.utc_offset_secs, Some(3600));
    }

    #[test]
    fn test_zero_hourly_count_is_rejected() {
        let toml = format!("{}\n[dashboard]\nhourly_count = 0\n", MINIMAL);
        assert!(parse_config(&toml).is_err());
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let toml = MINIMAL.replace("\"secret\"", "\"  \"");
        match parse_config(&toml) {
            Err(e) => assert_eq!(e.0, "open_weather.api_key must be set"),
            Ok(_) => panic!("expected a config error"),
        }
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let toml = MINIMAL.replace("[db]", "").replace("db_path = \"weatherdash.db\"", "");
        assert!(parse_config(&toml).is_err());
    }
}
