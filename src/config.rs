use dotenvy::dotenv;
use eyre::{Result, WrapErr, bail, eyre};
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_PROXY_BASE_URL, DEFAULT_PROXY_BIND_ADDR, DEFAULT_REQUEST_SPACING_MS, DEFAULT_TOKEN_DATA_PATH,
    FUNKIT_PRICE_ENDPOINT,
};

/// How price lookups reach the external API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSourceMode {
    Direct, // Call the price API with our own key
    Proxy,  // Go through the pass-through endpoint
}

impl fmt::Display for PriceSourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSourceMode::Direct => write!(f, "direct"),
            PriceSourceMode::Proxy => write!(f, "proxy"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub price_api_base_url: String,
    pub proxy_base_url: String,
    pub proxy_bind_addr: SocketAddr,
    pub price_source_mode: PriceSourceMode,
    pub token_data_path: PathBuf,
    pub request_spacing: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, `Config::load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_empty("FUNKIT_API_KEY").or_else(|| non_empty("API_KEY"));

        let price_api_base_url = non_empty("PRICE_API_BASE_URL")
            .unwrap_or_else(|| FUNKIT_PRICE_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&price_api_base_url)
            .wrap_err_with(|| format!("Invalid PRICE_API_BASE_URL: {}", price_api_base_url))?;

        let proxy_base_url = non_empty("PROXY_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PROXY_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&proxy_base_url).wrap_err_with(|| format!("Invalid PROXY_BASE_URL: {}", proxy_base_url))?;

        let bind_addr = non_empty("PROXY_BIND_ADDR").unwrap_or_else(|| DEFAULT_PROXY_BIND_ADDR.to_string());
        let proxy_bind_addr: SocketAddr = bind_addr
            .parse()
            .wrap_err_with(|| format!("Invalid PROXY_BIND_ADDR: {}", bind_addr))?;

        // Hosted deployments go through the proxy so the key never leaves the server
        let hosted = non_empty("VERCEL").is_some()
            || non_empty("DEPLOY_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));
        let price_source_mode = match non_empty("PRICE_SOURCE").map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("auto") => {
                if hosted {
                    PriceSourceMode::Proxy
                } else {
                    PriceSourceMode::Direct
                }
            }
            Some("direct") => PriceSourceMode::Direct,
            Some("proxy") => PriceSourceMode::Proxy,
            Some(other) => bail!("Invalid PRICE_SOURCE value '{}' (must be 'direct', 'proxy' or 'auto')", other),
        };

        let token_data_path = PathBuf::from(
            non_empty("TOKEN_DATA_PATH").unwrap_or_else(|| DEFAULT_TOKEN_DATA_PATH.to_string()),
        );

        let spacing_ms = match non_empty("PRICE_REQUEST_SPACING_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| eyre!("Invalid PRICE_REQUEST_SPACING_MS '{}': {}", raw, e))?,
            None => DEFAULT_REQUEST_SPACING_MS,
        };

        Ok(Config {
            api_key,
            price_api_base_url,
            proxy_base_url,
            proxy_bind_addr,
            price_source_mode,
            token_data_path,
            request_spacing: Duration::from_millis(spacing_ms),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| eyre!("Missing FUNKIT_API_KEY (or API_KEY)"))
    }
}
