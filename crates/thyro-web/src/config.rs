use std::net::SocketAddr;
use std::time::Duration;

use eyre::WrapErr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read from the environment with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub bind_addr: SocketAddr,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub log_json: bool,
}

impl WebConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("THYRO_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .wrap_err("THYRO_BIND_ADDR is not a socket address")?;
        let api_base_url =
            var("THYRO_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_timeout = match var("THYRO_API_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse()
                .wrap_err("THYRO_API_TIMEOUT_SECS is not a whole number of seconds")?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };
        let log_json = var("THYRO_LOG_JSON").is_some_and(|v| v == "1" || v == "true");

        Ok(Self {
            bind_addr,
            api_base_url,
            api_timeout: Duration::from_secs(api_timeout),
            log_json,
        })
    }
}
