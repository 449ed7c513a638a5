pub mod funkit_client;
pub mod price_book;
pub mod price_fetcher;
pub mod proxy_client;
pub mod throttle;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, PriceSourceMode};
pub use funkit_client::FunkitClient;
pub use price_book::PriceBook;
pub use price_fetcher::{fetch_token_price, fetch_token_prices};
pub use proxy_client::ProxyClient;
pub use throttle::RequestThrottle;
pub use types::{PriceError, PriceInfo, PriceOutcome};

/// Transport used to look up a token's price. Direct and proxied calls are interchangeable.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price_info(&self, chain_id: u64, address: &str) -> Result<PriceInfo, PriceError>;

    fn name(&self) -> &'static str;
}

pub fn build_price_source(config: &Config) -> eyre::Result<Arc<dyn PriceSource>> {
    let source: Arc<dyn PriceSource> = match config.price_source_mode {
        PriceSourceMode::Direct => Arc::new(FunkitClient::from_config(config)?),
        PriceSourceMode::Proxy => Arc::new(ProxyClient::new(&config.proxy_base_url)?),
    };
    info!(mode = %config.price_source_mode, source = source.name(), "Price source selected");
    Ok(source)
}
