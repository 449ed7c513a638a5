use std::collections::HashMap;
use tracing::debug;

use super::types::PriceOutcome;
use crate::token::{Token, TokenKey};

/// Last known USD price per token. Entries are only ever added or overwritten, never expired.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    by_key: HashMap<TokenKey, f64>,
    by_symbol: HashMap<String, f64>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a successful lookup. Unknown or non-positive prices leave the book untouched.
    pub fn record(&mut self, token: &Token, price: Option<f64>) -> bool {
        match price {
            Some(price) if price.is_finite() && price > 0.0 => {
                self.by_key.insert(token.key(), price);
                self.by_symbol.insert(token.symbol.clone(), price);
                debug!(symbol = %token.symbol, key = %token.key(), price, "Recorded price");
                true
            }
            _ => false,
        }
    }

    pub fn record_outcomes(&mut self, outcomes: &[PriceOutcome]) -> usize {
        outcomes
            .iter()
            .filter(|outcome| self.record(&outcome.token, outcome.price))
            .count()
    }

    pub fn price_for(&self, token: &Token) -> Option<f64> {
        self.by_key.get(&token.key()).copied()
    }

    pub fn price_for_symbol(&self, symbol: &str) -> Option<f64> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.by_key.contains_key(&token.key())
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
