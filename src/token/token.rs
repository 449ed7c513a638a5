use serde::{Deserialize, Serialize};
use std::fmt;

/// Static descriptor of an allow-listed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub address: String, // 0x + 40 hex chars, checksum casing preserved from the data file
}

impl Token {
    pub fn key(&self) -> TokenKey {
        TokenKey::new(self.chain_id, &self.address)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) on {}", self.symbol, self.name, chain_name(self.chain_id))
    }
}

/// Identity of a token: chain id plus lower-cased contract address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub chain_id: u64,
    pub address: String,
}

impl TokenKey {
    pub fn new(chain_id: u64, address: &str) -> Self {
        Self {
            chain_id,
            address: address.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

pub fn is_valid_token_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|digits| digits.len() == 40 && hex::decode(digits).is_ok())
}

pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum",
        137 => "Polygon",
        42161 => "Arbitrum",
        10 => "Optimism",
        _ => "Unknown Chain",
    }
}
