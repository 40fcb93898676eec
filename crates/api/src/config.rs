//! Application configuration loaded from environment variables.

use std::time::Duration;

use domain::RetryPolicy;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `"json"` for JSON log lines, anything else for text
/// - `OWNER_SERVICE_URL`: base URL of the user service (default: `"http://localhost:8081"`)
/// - `OWNER_CHECK_TIMEOUT_MS`: per-attempt owner lookup timeout (default: `2000`)
/// - `OWNER_CHECK_MAX_ATTEMPTS`: owner lookup attempts, first one included (default: `3`)
/// - `OWNER_CHECK_BACKOFF_MS`: delay before the first retry, doubled after (default: `100`)
///
/// Values that fail to parse fall back to their defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub json_logs: bool,
    pub owner_service_url: String,
    pub owner_check_timeout_ms: u64,
    pub owner_check_max_attempts: u32,
    pub owner_check_backoff_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            owner_service_url: lookup("OWNER_SERVICE_URL").unwrap_or(defaults.owner_service_url),
            owner_check_timeout_ms: parsed(&lookup, "OWNER_CHECK_TIMEOUT_MS")
                .unwrap_or(defaults.owner_check_timeout_ms),
            owner_check_max_attempts: parsed(&lookup, "OWNER_CHECK_MAX_ATTEMPTS")
                .unwrap_or(defaults.owner_check_max_attempts),
            owner_check_backoff_ms: parsed(&lookup, "OWNER_CHECK_BACKOFF_MS")
                .unwrap_or(defaults.owner_check_backoff_ms),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Per-attempt timeout for owner lookups.
    pub fn owner_check_timeout(&self) -> Duration {
        Duration::from_millis(self.owner_check_timeout_ms)
    }

    /// Retry schedule for owner lookups.
    pub fn owner_check_retry(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.owner_check_max_attempts,
            base_backoff: Duration::from_millis(self.owner_check_backoff_ms),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            json_logs: false,
            owner_service_url: "http://localhost:8081".to_string(),
            owner_check_timeout_ms: 2000,
            owner_check_max_attempts: 3,
            owner_check_backoff_ms: 100,
        }
    }
}
