use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::PriceSource;
use super::types::{PriceError, PriceInfo};
use crate::config::Config;
use crate::constants::HTTP_TIMEOUT_SECS;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Direct client for the Funkit ERC-20 price endpoint.
#[derive(Debug, Clone)]
pub struct FunkitClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl FunkitClient {
    pub fn new(base_url: &str, api_key: String) -> eyre::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Self::new(&config.price_api_base_url, config.require_api_key()?.to_string())
    }

    pub fn price_url(&self, chain_id: u64, address: &str) -> Result<Url, PriceError> {
        Ok(Url::parse(&format!("{}/{}/{}", self.base_url, chain_id, address))?)
    }

    /// Upstream status and JSON body, whatever the status. The proxy relays this as is.
    #[instrument(skip(self))]
    pub async fn fetch_raw(&self, chain_id: u64, address: &str) -> Result<(u16, Value), PriceError> {
        let url = self.price_url(chain_id, address)?;
        debug!(url = %url, "Sending request to Funkit price API");

        let response = self
            .http_client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;
        Ok((status, json))
    }
}

#[async_trait]
impl PriceSource for FunkitClient {
    async fn fetch_price_info(&self, chain_id: u64, address: &str) -> Result<PriceInfo, PriceError> {
        let (status, body) = self.fetch_raw(chain_id, address).await?;
        if !(200..300).contains(&status) {
            return Err(PriceError::Status {
                status,
                url: self.price_url(chain_id, address)?.to_string(),
            });
        }
        Ok(serde_json::from_value(body)?)
    }

    fn name(&self) -> &'static str {
        "funkit"
    }
}
