use rand::Rng;
use rand::seq::SliceRandom;

use super::token::Token;
use super::token_catalog::TokenCatalog;
use crate::constants::{POPULAR_TOKENS, PRIORITY_TOKENS};

/// Tokens whose symbol or name contains the trimmed, lower-cased term, optionally limited to one chain.
/// An empty term matches everything. Catalog order is preserved.
pub fn search_tokens(catalog: &TokenCatalog, search_term: &str, chain_id: Option<u64>) -> Vec<Token> {
    let normalized = search_term.trim().to_lowercase();
    catalog
        .tokens()
        .iter()
        .filter(|t| chain_id.is_none_or(|id| t.chain_id == id))
        .filter(|t| {
            normalized.is_empty()
                || t.symbol.to_lowercase().contains(&normalized)
                || t.name.to_lowercase().contains(&normalized)
        })
        .cloned()
        .collect()
}

/// Stable reorder: listed symbols first in list order, everything else after in original order.
pub fn sort_by_popularity(tokens: &[Token], popularity: &[&str]) -> Vec<Token> {
    let mut sorted = tokens.to_vec();
    sorted.sort_by_key(|t| {
        popularity
            .iter()
            .position(|p| *p == t.symbol)
            .unwrap_or(popularity.len())
    });
    sorted
}

/// Search results ordered with the default popularity list.
pub fn filtered_tokens(catalog: &TokenCatalog, search_term: &str) -> Vec<Token> {
    sort_by_popularity(&search_tokens(catalog, search_term, None), &POPULAR_TOKENS)
}

/// Default list for an empty search box: priority tokens, then a random sample of the rest.
pub fn top_tokens<R: Rng + ?Sized>(catalog: &TokenCatalog, limit: usize, rng: &mut R) -> Vec<Token> {
    let mut result: Vec<Token> = PRIORITY_TOKENS
        .iter()
        .filter_map(|symbol| catalog.tokens().iter().find(|t| t.symbol == *symbol))
        .take(limit)
        .cloned()
        .collect();

    let mut remaining: Vec<&Token> = catalog
        .tokens()
        .iter()
        .filter(|t| !PRIORITY_TOKENS.contains(&t.symbol.as_str()))
        .collect();
    remaining.shuffle(rng);

    let room = limit.saturating_sub(result.len());
    result.extend(remaining.into_iter().take(room).cloned());
    result
}
