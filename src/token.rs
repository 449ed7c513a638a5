pub mod token;
pub mod token_catalog;
pub mod token_search;

pub use token::{Token, TokenKey, chain_name, is_valid_token_address};
pub use token_catalog::TokenCatalog;
