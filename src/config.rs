//! Environment-driven configuration
//!
//! Everything is read once at start-up. Unset variables fall back to the
//! defaults below; set-but-unparsable values are an error.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_HISTORY_TURNS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the Gemini completion client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub gemini: GeminiConfig,
    /// Pause between the typing indicator going away and the reply landing
    pub reply_delay: Duration,
    /// Cap on prior turns forwarded with each request
    pub history_turns: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = parse_var(&lookup, "BANTER_BIND")?.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = parse_var(&lookup, "BANTER_PORT")?.unwrap_or(DEFAULT_PORT);
        let reply_delay = parse_var::<u64, _>(&lookup, "BANTER_REPLY_DELAY_MS")?
            .map_or(DEFAULT_REPLY_DELAY, Duration::from_millis);
        let timeout = parse_var::<u64, _>(&lookup, "BANTER_REQUEST_TIMEOUT_SECS")?
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs);

        let history_turns =
            parse_var(&lookup, "BANTER_HISTORY_TURNS")?.unwrap_or(DEFAULT_HISTORY_TURNS);
        if history_turns == 0 {
            return Err(ConfigError::Invalid {
                var: "BANTER_HISTORY_TURNS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let gemini = GeminiConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        };

        Ok(Self {
            bind,
            port,
            gemini,
            reply_delay,
            history_turns,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
