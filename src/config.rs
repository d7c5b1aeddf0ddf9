//! Configuration module for the watchlist picker
//!
//! Handles loading environment variables and application configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::ClientConfig;
use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Origin of the content server; `/random` is appended to it
    pub base_url: String,
    /// Total request timeout; unset waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// JSON autofill catalog; unset uses the built-in table
    pub catalog_path: Option<PathBuf>,
    /// Initial value of the random type input
    pub pick_type: String,
    /// Initial value of the probability input
    pub pick_prob: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: None,
            connect_timeout: Duration::from_secs(10),
            catalog_path: None,
            pick_type: String::new(),
            pick_prob: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .map(|v| parse_secs("REQUEST_TIMEOUT_SECS", &v))
            .transpose()?;

        let connect_timeout = lookup("CONNECT_TIMEOUT_SECS")
            .map(|v| parse_secs("CONNECT_TIMEOUT_SECS", &v))
            .transpose()?
            .unwrap_or(defaults.connect_timeout);

        Ok(Self {
            base_url: lookup("BASE_URL").unwrap_or(defaults.base_url),
            request_timeout,
            connect_timeout,
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
            pick_type: lookup("PICK_TYPE").unwrap_or_default(),
            pick_prob: lookup("PICK_PROB").unwrap_or_default(),
        })
    }

    /// HTTP client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

fn parse_secs(key: &str, value: &str) -> AppResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| AppError::config(format!("{} must be a whole number of seconds", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("BASE_URL", "http://media.local"),
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("CONNECT_TIMEOUT_SECS", " 3 "),
            ("CATALOG_PATH", "/etc/picker/catalog.json"),
            ("PICK_TYPE", "movie"),
            ("PICK_PROB", "4"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://media.local");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/picker/catalog.json")));
        assert_eq!(config.pick_type, "movie");
        assert_eq!(config.pick_prob, "4");

        let client = config.client_config();
        assert_eq!(client.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.user_message().contains("REQUEST_TIMEOUT_SECS"));
    }
}
