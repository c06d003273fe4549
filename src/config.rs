// src/config.rs

//! Process configuration, read once at startup.
//!
//! Values come from the environment (after `.env` has been loaded by `main`).
//! Handlers never read the environment themselves; they receive a [`Config`]
//! through the application state.

use std::time::Duration;

use axum::http::HeaderValue;
use tracing::debug;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GSB_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(14 * 60);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Please set it in .env or your environment.")]
    Missing(&'static str),

    #[error("{name} must be a positive number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} is not a valid URL ({value:?}): {source}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("FRONTEND_ORIGIN is not a valid origin: {0:?}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The only origin allowed to call the API from a browser.
    pub frontend_origin: HeaderValue,
    pub port: u16,
    pub gsb_api_key: String,
    pub gsb_endpoint: Url,
    /// Public address of this service. Keep-alive pings are disabled when unset.
    pub backend_url: Option<Url>,
    pub upstream_timeout: Duration,
    pub keepalive_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, like an empty line in `.env`.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let origin = get("FRONTEND_ORIGIN").ok_or(ConfigError::Missing("FRONTEND_ORIGIN"))?;
        let frontend_origin = HeaderValue::from_str(origin.trim_end_matches('/'))
            .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let gsb_api_key = get("GSB_API_KEY").ok_or(ConfigError::Missing("GSB_API_KEY"))?;

        let gsb_endpoint = parse_url(
            "GSB_ENDPOINT",
            &get("GSB_ENDPOINT").unwrap_or_else(|| DEFAULT_GSB_ENDPOINT.to_string()),
        )?;

        let backend_url = get("BACKEND_URL")
            .map(|raw| parse_url("BACKEND_URL", &raw))
            .transpose()?;

        let upstream_timeout = parse_secs(&get, "UPSTREAM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT);
        let keepalive_interval =
            parse_secs(&get, "KEEPALIVE_INTERVAL_SECS")?.unwrap_or(DEFAULT_KEEPALIVE_INTERVAL);

        let config = Config {
            frontend_origin,
            port,
            gsb_api_key,
            gsb_endpoint,
            backend_url,
            upstream_timeout,
            keepalive_interval,
        };
        debug!(port = config.port, endpoint = %config.gsb_endpoint, "Configuration loaded.");
        Ok(config)
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_secs<G>(get: &G, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
            _ => Err(ConfigError::InvalidNumber { name, value: raw }),
        },
    }
}
