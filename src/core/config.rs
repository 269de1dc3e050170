//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup from the process environment (and a
//! `.env` file, if present) and then shared read-only as `Arc<Config>`.
//! [`Config::from_lookup`] takes any key → value function so loading can be
//! tested without touching the real environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{Error, Result};
use super::transport::HttpConfig;
use super::transport::config::{DEFAULT_PORT, default_host, default_rpc_path, parse_flag};

pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
pub const DEFAULT_STORE_API_BASE_URL: &str = "https://store.steampowered.com/api";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Value shipped in sample `.env` files; calls made with it will fail.
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub transport: HttpConfig,

    /// Upstream Steam API settings and credentials.
    pub steam: SteamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    pub description: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Steam API endpoints, key and timeouts.
#[derive(Clone, Serialize, Deserialize)]
pub struct SteamConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub store_api_base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for SteamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("store_api_base_url", &self.store_api_base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

impl SteamConfig {
    /// Default endpoints and timeouts for the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_api_base_url: DEFAULT_STORE_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "SteamStats MCP Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Provides Steam statistics and data via the Model Context Protocol."
                .to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default configuration around an API key.
    pub fn for_api_key(api_key: impl Into<String>) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            transport: HttpConfig::default(),
            steam: SteamConfig::with_api_key(api_key),
        }
    }

    /// Load configuration from the environment, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// `STEAM_API_KEY` is required. Everything else falls back to defaults;
    /// malformed numbers and URLs are errors rather than silent fallbacks.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("STEAM_API_KEY")
            .ok_or_else(|| Error::config("STEAM_API_KEY is not set"))?;
        if api_key == PLACEHOLDER_API_KEY {
            warn!(
                "STEAM_API_KEY is set to the default placeholder value. \
                 Steam API calls will likely fail."
            );
        }

        let mut config = Self::for_api_key(api_key);

        if let Some(name) = var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = level.to_lowercase();
        }

        config.transport = HttpConfig {
            host: var("HOST").unwrap_or_else(default_host),
            port: parse_number("PORT", var("PORT"), DEFAULT_PORT)?,
            rpc_path: var("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path),
            enable_cors: var("MCP_HTTP_CORS").map(|v| parse_flag(&v)).unwrap_or(true),
        };
        if !config.transport.rpc_path.starts_with('/') {
            return Err(Error::config(format!(
                "MCP_HTTP_PATH must start with '/', got '{}'",
                config.transport.rpc_path
            )));
        }

        if let Some(url) = var("STEAM_API_BASE_URL") {
            config.steam.api_base_url = parse_base_url("STEAM_API_BASE_URL", &url)?;
        }
        if let Some(url) = var("STEAM_STORE_API_BASE_URL") {
            config.steam.store_api_base_url = parse_base_url("STEAM_STORE_API_BASE_URL", &url)?;
        }

        config.steam.connect_timeout = Duration::from_secs(parse_number(
            "STEAM_CONNECT_TIMEOUT_SECS",
            var("STEAM_CONNECT_TIMEOUT_SECS"),
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?);
        config.steam.read_timeout = Duration::from_secs(parse_number(
            "STEAM_READ_TIMEOUT_SECS",
            var("STEAM_READ_TIMEOUT_SECS"),
            DEFAULT_READ_TIMEOUT_SECS,
        )?);

        info!("Application settings loaded. Log level: {}", config.logging.level);
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}

/// Validate an http(s) URL and drop any trailing slash.
fn parse_base_url(key: &str, raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| Error::config(format!("{} is not a valid URL: {}", key, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
