// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::models::{ResultFormat, DEFAULT_LANGUAGE};
use crate::services::transport::DEFAULT_TIMEOUT_SECS;
use crate::services::DEFAULT_BASE_URL;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

/// Client configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Places API Key
    pub google_places_api_key: String,

    /// Places API base URL (no trailing path segment)
    pub api_url: String,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Response language
    pub language: String,

    /// Response format: json or xml
    pub result_format: ResultFormat,

    /// Value of the "sensor" parameter
    pub sensor: bool,

    /// Percent-encode parameter values instead of sending them literally
    pub percent_encode: bool,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_places_api_key: String::new(),
            api_url: DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: DEFAULT_LANGUAGE.to_string(),
            result_format: ResultFormat::Json,
            sensor: false,
            percent_encode: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            google_places_api_key: lookup("GOOGLE_PLACES_API_KEY")
                .unwrap_or(defaults.google_places_api_key),

            api_url: lookup("PLACES_API_URL").unwrap_or(defaults.api_url),

            http_timeout_secs: parse_or(lookup("PLACES_HTTP_TIMEOUT"), defaults.http_timeout_secs),

            language: lookup("PLACES_LANGUAGE").unwrap_or(defaults.language),

            result_format: lookup("PLACES_RESULT_FORMAT")
                .map(|f| ResultFormat::from(f.as_str()))
                .unwrap_or(defaults.result_format),

            sensor: parse_or(lookup("PLACES_SENSOR"), defaults.sensor),

            percent_encode: parse_or(lookup("PLACES_PERCENT_ENCODE"), defaults.percent_encode),

            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the client can issue requests
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("PLACES_API_URL must not be empty".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("PLACES_HTTP_TIMEOUT must be greater than zero".to_string());
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - requests will be denied");
        }

        Ok(())
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.api_url, "https://maps.googleapis.com/maps/api/place");
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.language, "en");
        assert_eq!(config.result_format, ResultFormat::Json);
        assert!(!config.sensor);
        assert!(!config.percent_encode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GOOGLE_PLACES_API_KEY", "KEY"),
            ("PLACES_HTTP_TIMEOUT", "5"),
            ("PLACES_RESULT_FORMAT", "xml"),
            ("PLACES_SENSOR", "true"),
            ("PLACES_PERCENT_ENCODE", "true"),
        ]);

        assert_eq!(config.google_places_api_key, "KEY");
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.result_format, ResultFormat::Xml);
        assert!(config.sensor);
        assert!(config.percent_encode);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = config_from(&[("PLACES_HTTP_TIMEOUT", "soon"), ("PLACES_SENSOR", "yes")]);

        assert_eq!(config.http_timeout_secs, 30);
        assert!(!config.sensor);
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = config_from(&[("PLACES_HTTP_TIMEOUT", "0")]);
        assert!(config.validate().is_err());
    }
}
