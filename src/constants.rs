//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the timetable backend service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default HTTP timeout in seconds (same bound the backend applies upstream)
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Environment variable overriding the API base URL
pub const ENV_API_BASE_URL: &str = "TIMETABLE_API_URL";

/// Environment variable overriding the HTTP timeout in seconds
pub const ENV_HTTP_TIMEOUT: &str = "TIMETABLE_HTTP_TIMEOUT";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Timetable TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
