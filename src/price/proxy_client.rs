use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::PriceSource;
use super::types::{PriceError, PriceInfo};
use crate::constants::HTTP_TIMEOUT_SECS;

/// Goes through the pass-through endpoint, which holds the API key itself.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http_client: Client,
    proxy_url: Url,
}

impl ProxyClient {
    pub fn new(proxy_base_url: &str) -> eyre::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        let proxy_url = Url::parse(&format!("{}/proxy", proxy_base_url.trim_end_matches('/')))?;
        Ok(Self { http_client, proxy_url })
    }

    pub fn proxy_url(&self) -> &Url {
        &self.proxy_url
    }
}

#[async_trait]
impl PriceSource for ProxyClient {
    #[instrument(skip(self))]
    async fn fetch_price_info(&self, chain_id: u64, address: &str) -> Result<PriceInfo, PriceError> {
        let mut url = self.proxy_url.clone();
        url.query_pairs_mut()
            .append_pair("chainId", &chain_id.to_string())
            .append_pair("address", address);
        debug!(url = %url, "Sending request to price proxy");

        let response = self.http_client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(PriceError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}
