//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Default location of the record file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/users.json";

/// Top-level configuration.
///
/// Loaded once at startup via [`RosterConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Path of the JSON file holding the record collection.
    pub data_file: PathBuf,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Seconds before an HTTP request is aborted.
    pub request_timeout_secs: u64,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl RosterConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let data_file = lookup("DATA_FILE")
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from);

        let event_bus_capacity = parse_value(lookup("EVENT_BUS_CAPACITY"), 1024);
        let request_timeout_secs = parse_value(lookup("REQUEST_TIMEOUT_SECS"), 30);
        let log_json = parse_bool(lookup("LOG_JSON"), false);

        Ok(Self {
            listen_addr,
            data_file,
            event_bus_capacity,
            request_timeout_secs,
            log_json,
        })
    }

    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses `raw` as `T`, returning `default` on missing or invalid values.
fn parse_value<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw.map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
