use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::token::Token;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("price request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("price API returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("price response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("price response has no usable `total` field")]
    MissingPrice,
    #[error("invalid price request url: {0}")]
    Url(#[from] url::ParseError),
}

/// Body of the Funkit price endpoint. Only `total` is read, the rest is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceInfo {
    #[serde(default)]
    pub total: Option<Value>,
}

impl PriceInfo {
    pub fn usd_price(&self) -> Option<f64> {
        self.total.as_ref().and_then(parse_price_total)
    }
}

/// Accepts `"2500.50"` or `2500.5`. Anything that is not a finite positive number is unknown.
pub fn parse_price_total(total: &Value) -> Option<f64> {
    let price = match total {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (price.is_finite() && price > 0.0).then_some(price)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceOutcome {
    pub token: Token,
    pub price: Option<f64>, // None when the lookup failed or the response had no price
}
