use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use eyre::{Result, WrapErr, bail};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::token::{Token, TokenKey, is_valid_token_address};

#[derive(Debug, Deserialize)]
struct TokenFile {
    tokens: Vec<Token>,
}

/// The allow-list of tokens, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
    index: HashMap<TokenKey, usize>,
}

impl TokenCatalog {
    #[instrument(fields(on_close = true))]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!(file = %path.display(), "Loading token catalog from file");
        let file_content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read token data file {}", path.display()))?;
        let catalog = Self::from_json_str(&file_content)
            .wrap_err_with(|| format!("Failed to parse token data file {}", path.display()))?;
        info!(loaded_count = catalog.len(), "Token catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TokenFile = serde_json::from_str(json)?;
        Self::from_tokens(file.tokens)
    }

    /// Keeps the first record for each (chain id, address) and rejects malformed addresses.
    pub fn from_tokens(records: Vec<Token>) -> Result<Self> {
        let mut tokens = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for token in records {
            if !is_valid_token_address(&token.address) {
                bail!(
                    "Token {} on chain {} has an invalid address: {}",
                    token.symbol,
                    token.chain_id,
                    token.address
                );
            }
            let key = token.key();
            if index.contains_key(&key) {
                warn!(symbol = %token.symbol, key = %key, "Duplicate token record skipped");
                continue;
            }
            debug!(symbol = %token.symbol, chain_id = token.chain_id, address = %token.address, "Loaded token");
            index.insert(key, tokens.len());
            tokens.push(token);
        }

        Ok(Self { tokens, index })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, key: &TokenKey) -> Option<&Token> {
        self.index.get(key).map(|&i| &self.tokens[i])
    }

    pub fn find_by_address(&self, address: &str, chain_id: u64) -> Option<&Token> {
        self.get(&TokenKey::new(chain_id, address))
    }

    pub fn is_token_allowed(&self, address: &str, chain_id: u64) -> bool {
        self.find_by_address(address, chain_id).is_some()
    }

    pub fn find_by_symbol_and_chain(&self, symbol: &str, chain_id: u64) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.chain_id == chain_id && t.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn tokens_by_chain(&self, chain_id: u64) -> Vec<Token> {
        self.tokens.iter().filter(|t| t.chain_id == chain_id).cloned().collect()
    }

    // First occurrence of each symbol, in catalog order
    pub fn unique_by_symbol(&self) -> Vec<Token> {
        let mut seen = HashSet::new();
        self.tokens
            .iter()
            .filter(|t| seen.insert(t.symbol.as_str()))
            .cloned()
            .collect()
    }

    /// Resolves free-form user input to a token by exact symbol or name.
    pub fn parse_token_input(&self, input: &str) -> Option<&Token> {
        let search = input.trim().to_lowercase();
        if search.is_empty() {
            return None;
        }
        self.tokens
            .iter()
            .find(|t| t.symbol.to_lowercase() == search || t.name.to_lowercase() == search)
    }
}
