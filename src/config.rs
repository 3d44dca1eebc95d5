//! Runtime configuration - compiled defaults with environment overrides
//!
//! Nothing is persisted to disk; the session is entirely in-memory.

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, ENV_API_BASE_URL, ENV_HTTP_TIMEOUT,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the timetable backend, without a trailing slash
    pub api_base_url: String,
    /// HTTP timeout applied to every request
    pub http_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// - `TIMETABLE_API_URL` - backend base URL
    /// - `TIMETABLE_HTTP_TIMEOUT` - timeout in seconds
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(timeout) = std::env::var(ENV_HTTP_TIMEOUT) {
            if let Ok(seconds) = timeout.parse::<u64>() {
                if seconds > 0 {
                    config.http_timeout_seconds = seconds;
                }
            }
        }

        config
    }
}
