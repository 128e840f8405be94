//! Workbench configuration loaded from environment variables.
//!
//! All settings come from environment variables, or a `.env` file via
//! `dotenvy`. Missing or unparseable values fall back to the defaults in
//! [`crate::domain::settings`].

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::settings::{
    ConfigProvider, DEFAULT_EXPIRING_SOON_DAYS, DEFAULT_FOCUS_PENDING_LIMIT,
    DEFAULT_REPORT_WINDOW_DAYS, DEFAULT_WARNING_DAYS, Thresholds,
};
use crate::error::WorkbenchError;

/// Default bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level service configuration.
///
/// Loaded once at startup via [`WorkbenchConfig::from_env`].
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Seconds before an HTTP request is aborted.
    pub request_timeout_secs: u64,

    /// Operator override of the default option term, in days.
    pub default_option_term_days: Option<u32>,

    /// Option and dashboard thresholds.
    pub thresholds: Thresholds,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_option_term_days: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl WorkbenchConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::InvalidRequest`] if `LISTEN_ADDR` is set
    /// but cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, WorkbenchError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`WorkbenchConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WorkbenchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|e| WorkbenchError::InvalidRequest(format!("LISTEN_ADDR {raw_addr}: {e}")))?;

        let thresholds = Thresholds {
            expiring_soon_days: parse_value(
                &lookup,
                "OPTION_EXPIRING_SOON_DAYS",
                DEFAULT_EXPIRING_SOON_DAYS,
            ),
            warning_days: parse_value(&lookup, "OPTION_WARNING_DAYS", DEFAULT_WARNING_DAYS),
            focus_pending_limit: parse_value(
                &lookup,
                "FOCUS_PENDING_LIMIT",
                DEFAULT_FOCUS_PENDING_LIMIT,
            ),
            report_window_days: parse_value(
                &lookup,
                "OPTION_REPORT_WINDOW_DAYS",
                DEFAULT_REPORT_WINDOW_DAYS,
            ),
        };

        let default_option_term_days = lookup("DEFAULT_OPTION_TERM_DAYS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|days| *days > 0);

        Ok(Self {
            listen_addr,
            request_timeout_secs: parse_value(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            default_option_term_days,
            thresholds,
        })
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ConfigProvider for WorkbenchConfig {
    fn default_option_term_days(&self) -> Option<u32> {
        self.default_option_term_days
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

/// Parses a looked-up value as `T`, returning `default` on missing or
/// invalid values.
fn parse_value<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(config) = WorkbenchConfig::from_lookup(lookup(&[])) else {
            panic!("defaults should load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.default_option_term_days, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = WorkbenchConfig::from_lookup(lookup(&[
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("OPTION_EXPIRING_SOON_DAYS", "3"),
            ("FOCUS_PENDING_LIMIT", "10"),
            ("DEFAULT_OPTION_TERM_DAYS", " 14 "),
        ])) else {
            panic!("overrides should load");
        };
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.thresholds.expiring_soon_days, 3);
        assert_eq!(config.thresholds.focus_pending_limit, 10);
        assert_eq!(config.thresholds.warning_days, DEFAULT_WARNING_DAYS);
        assert_eq!(config.default_option_term_days(), Some(14));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let Ok(config) = WorkbenchConfig::from_lookup(lookup(&[
            ("OPTION_WARNING_DAYS", "a week"),
            ("DEFAULT_OPTION_TERM_DAYS", "0"),
        ])) else {
            panic!("should load");
        };
        assert_eq!(config.thresholds.warning_days, DEFAULT_WARNING_DAYS);
        assert_eq!(config.default_option_term_days, None);
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        let result = WorkbenchConfig::from_lookup(lookup(&[("LISTEN_ADDR", "nowhere")]));
        assert!(matches!(result, Err(WorkbenchError::InvalidRequest(_))));
    }
}
