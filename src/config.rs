use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binance USDT-M Futures testnet REST endpoint
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Largest receive window the exchange accepts (milliseconds)
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Exchange connection settings, built once per invocation and handed to the client
#[derive(Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// API key sent in the `X-MBX-APIKEY` header
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Secret used for HMAC request signing
    #[serde(default, skip_serializing)]
    pub api_secret: String,

    /// REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Receive window in milliseconds (tolerates clock drift)
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,

    /// Upper bound on one request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fetch the server clock before signing and correct local timestamps
    #[serde(default)]
    pub sync_time: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: default_base_url(),
            recv_window_ms: default_recv_window_ms(),
            request_timeout_secs: default_timeout_secs(),
            sync_time: false,
        }
    }
}

// Secrets never appear in logs
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("base_url", &self.base_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sync_time", &self.sync_time)
            .finish()
    }
}

impl BotConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `API_KEY`, `API_SECRET`: exchange credentials
    /// - `BINANCE_BASE_URL`: REST endpoint (default: futures testnet)
    /// - `BINANCE_RECV_WINDOW_MS`: receive window (default: 60000)
    /// - `BINANCE_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `BINANCE_SYNC_TIME`: true/false for server time sync (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`BotConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: lookup("API_KEY").unwrap_or_default(),
            api_secret: lookup("API_SECRET").unwrap_or_default(),
            base_url: lookup("BINANCE_BASE_URL").unwrap_or_else(default_base_url),
            recv_window_ms: parse_var(&lookup, "BINANCE_RECV_WINDOW_MS", default_recv_window_ms())?,
            request_timeout_secs: parse_var(&lookup, "BINANCE_TIMEOUT_SECS", default_timeout_secs())?,
            sync_time: lookup("BINANCE_SYNC_TIME")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
        };
        config.validate_settings()?;
        Ok(config)
    }

    /// Check the non-secret settings
    pub fn validate_settings(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                name: "BINANCE_BASE_URL",
                value: self.base_url.clone(),
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.recv_window_ms == 0 || self.recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(ConfigError::InvalidValue {
                name: "BINANCE_RECV_WINDOW_MS",
                value: self.recv_window_ms.to_string(),
                reason: format!("must be between 1 and {}", MAX_RECV_WINDOW_MS),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "BINANCE_TIMEOUT_SECS",
                value: self.request_timeout_secs.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Check that both credentials are present
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("API_KEY"));
        }
        if self.api_secret.trim().is_empty() {
            return Err(ConfigError::Missing("API_SECRET"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

// Default value functions for serde
fn default_base_url() -> String {
    TESTNET_BASE_URL.to_string()
}

fn default_recv_window_ms() -> u64 {
    MAX_RECV_WINDOW_MS
}

fn default_timeout_secs() -> u64 {
    30
}
