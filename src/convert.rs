use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::constants::{AMOUNT_DECIMALS, DEFAULT_CHAIN_ID, DEFAULT_SOURCE_SYMBOL, DEFAULT_TARGET_SYMBOL};
use crate::price::{PriceBook, PriceSource, fetch_token_price};
use crate::token::{Token, TokenCatalog};

/// How many tokens `usd_amount` buys at `price`, with five decimals. `"0.00000"` when either side is unusable.
pub fn token_amount_for_usd(usd_amount: &str, price: Option<f64>) -> String {
    let zero = format!("{:.*}", AMOUNT_DECIMALS, 0.0);
    let Some(price) = price.filter(|p| *p > 0.0) else {
        return zero;
    };
    let Ok(usd) = usd_amount.trim().parse::<f64>() else {
        return zero;
    };
    let amount = usd / price;
    if amount.is_finite() {
        format!("{:.*}", AMOUNT_DECIMALS, amount)
    } else {
        zero
    }
}

pub fn format_unit_price(symbol: &str, price: Option<f64>) -> String {
    match price {
        Some(price) => format!("1 {} = ${:.2}", symbol, price),
        None => format!("1 {} = Loading...", symbol),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionQuote {
    pub usd_amount: String,
    pub source: Token,
    pub target: Token,
    pub source_amount: String,
    pub target_amount: String,
    pub source_unit_price: String,
    pub target_unit_price: String,
}

impl fmt::Display for ConversionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "${} ≈ {} {} → {} {}",
            self.usd_amount, self.source_amount, self.source.symbol, self.target_amount, self.target.symbol
        )?;
        writeln!(f, "{}", self.source_unit_price)?;
        write!(f, "{}", self.target_unit_price)
    }
}

/// Two selected tokens and a USD amount, with prices fetched lazily as tokens are picked.
pub struct ConverterSession {
    price_source: Arc<dyn PriceSource>,
    prices: PriceBook,
    source_token: Option<Token>,
    target_token: Option<Token>,
    usd_amount: String,
}

impl ConverterSession {
    pub fn new(price_source: Arc<dyn PriceSource>) -> Self {
        Self {
            price_source,
            prices: PriceBook::new(),
            source_token: None,
            target_token: None,
            usd_amount: String::new(),
        }
    }

    /// Selects ETH and USDT on Ethereum mainnet and fetches both prices concurrently.
    #[instrument(skip(self, catalog), fields(on_close = true))]
    pub async fn initialize(&mut self, catalog: &TokenCatalog) {
        let source = catalog.find_by_symbol_and_chain(DEFAULT_SOURCE_SYMBOL, DEFAULT_CHAIN_ID).cloned();
        let target = catalog.find_by_symbol_and_chain(DEFAULT_TARGET_SYMBOL, DEFAULT_CHAIN_ID).cloned();
        let (Some(source), Some(target)) = (source, target) else {
            warn!(
                source = DEFAULT_SOURCE_SYMBOL,
                target = DEFAULT_TARGET_SYMBOL,
                chain_id = DEFAULT_CHAIN_ID,
                "Default tokens missing from catalog, nothing selected"
            );
            return;
        };

        let (source_price, target_price) = tokio::join!(
            fetch_token_price(self.price_source.as_ref(), &source),
            fetch_token_price(self.price_source.as_ref(), &target),
        );
        self.prices.record(&source, source_price);
        self.prices.record(&target, target_price);
        info!(source = %source.symbol, target = %target.symbol, "Converter initialized");
        self.source_token = Some(source);
        self.target_token = Some(target);
    }

    pub fn set_usd_amount(&mut self, usd_amount: &str) {
        self.usd_amount = usd_amount.to_string();
    }

    pub async fn select_source(&mut self, token: Token) {
        self.ensure_price(&token).await;
        self.source_token = Some(token);
    }

    pub async fn select_target(&mut self, token: Token) {
        self.ensure_price(&token).await;
        self.target_token = Some(token);
    }

    // Known prices are never refetched
    async fn ensure_price(&mut self, token: &Token) {
        if self.prices.contains(token) {
            return;
        }
        let price = fetch_token_price(self.price_source.as_ref(), token).await;
        self.prices.record(token, price);
    }

    pub fn source_token(&self) -> Option<&Token> {
        self.source_token.as_ref()
    }

    pub fn target_token(&self) -> Option<&Token> {
        self.target_token.as_ref()
    }

    pub fn prices(&self) -> &PriceBook {
        &self.prices
    }

    /// None until both tokens are selected.
    pub fn quote(&self) -> Option<ConversionQuote> {
        let source = self.source_token.as_ref()?;
        let target = self.target_token.as_ref()?;
        let source_price = self.prices.price_for(source);
        let target_price = self.prices.price_for(target);
        Some(ConversionQuote {
            usd_amount: self.usd_amount.clone(),
            source: source.clone(),
            target: target.clone(),
            source_amount: token_amount_for_usd(&self.usd_amount, source_price),
            target_amount: token_amount_for_usd(&self.usd_amount, target_price),
            source_unit_price: format_unit_price(&source.symbol, source_price),
            target_unit_price: format_unit_price(&target.symbol, target_price),
        })
    }
}
