//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// Every value can be set through an environment variable; unset or
/// unparseable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for cached orders
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// JSON data file for the order store; in-memory store when unset
    pub data_file: Option<PathBuf>,
    /// Directory for the daily rolling log file; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Cached order TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Expired entry sweep frequency in seconds (default: 1)
    /// - `DATA_FILE` - Path of the order data file (default: unset)
    /// - `LOG_DIR` - Rolling log file directory, blank to disable (default: logs)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_or(lookup("SERVER_PORT"), defaults.server_port),
            cache_max_entries: parse_or(lookup("CACHE_MAX_ENTRIES"), defaults.cache_max_entries),
            cache_ttl: parse_or(lookup("CACHE_TTL"), defaults.cache_ttl),
            cleanup_interval: parse_or(lookup("CLEANUP_INTERVAL"), defaults.cleanup_interval),
            data_file: lookup("DATA_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_dir: match lookup("LOG_DIR") {
                Some(dir) if dir.trim().is_empty() => None,
                Some(dir) => Some(PathBuf::from(dir)),
                None => defaults.log_dir,
            },
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: 1000,
            cache_ttl: 300,
            cleanup_interval: 1,
            data_file: None,
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}
