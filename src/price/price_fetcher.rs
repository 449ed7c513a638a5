use tracing::{debug, info, instrument, warn};

use super::PriceSource;
use super::throttle::RequestThrottle;
use super::types::{PriceError, PriceOutcome};
use crate::token::Token;

/// Looks up one token's USD price. Failures are logged and reported as unknown.
#[instrument(skip(source, token), fields(symbol = %token.symbol, chain_id = token.chain_id, source = source.name()))]
pub async fn fetch_token_price(source: &dyn PriceSource, token: &Token) -> Option<f64> {
    match try_fetch_token_price(source, token).await {
        Ok(price) => {
            debug!(price, "Fetched token price");
            Some(price)
        }
        Err(e) => {
            warn!(
                symbol = %token.symbol,
                chain_id = token.chain_id,
                address = %token.address,
                error = %e,
                "Failed to fetch token price"
            );
            None
        }
    }
}

async fn try_fetch_token_price(source: &dyn PriceSource, token: &Token) -> Result<f64, PriceError> {
    let info = source.fetch_price_info(token.chain_id, &token.address).await?;
    info.usd_price().ok_or(PriceError::MissingPrice)
}

/// Fetches prices one token at a time, waiting on `throttle` before every request.
///
/// Yields exactly one outcome per input token, in input order. A failed token never stops the batch.
#[instrument(skip(source, throttle, tokens), fields(on_close = true, token_count = tokens.len()))]
pub async fn fetch_token_prices(
    source: &dyn PriceSource,
    throttle: &RequestThrottle,
    tokens: &[Token],
) -> Vec<PriceOutcome> {
    let mut outcomes = Vec::with_capacity(tokens.len());
    for token in tokens {
        throttle.wait().await;
        let price = fetch_token_price(source, token).await;
        outcomes.push(PriceOutcome {
            token: token.clone(),
            price,
        });
    }

    let priced_count = outcomes.iter().filter(|o| o.price.is_some()).count();
    info!(
        requested = tokens.len(),
        priced = priced_count,
        unknown = tokens.len() - priced_count,
        "Batch price fetch completed"
    );
    outcomes
}
