//! Process configuration, read once at startup.

use std::net::SocketAddr;

use thiserror::Error;

/// Hosted generation endpoint used when `API_URL` is not set.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Everything the process needs from its environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `API_KEY` (required), `API_URL` and `BIND_ADDR` (optional).
    ///
    /// A missing credential fails startup here instead of surfacing later as
    /// a failed generation call.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("API_KEY").ok(),
            std::env::var("API_URL").ok(),
            std::env::var("BIND_ADDR").ok(),
        )
    }

    fn from_vars(
        api_key: Option<String>,
        api_url: Option<String>,
        bind_addr: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(ConfigError::MissingVar("API_KEY")),
        };

        let api_base = api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let bind_addr = bind_addr
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            api_key,
            api_base,
            bind_addr,
        })
    }
}
