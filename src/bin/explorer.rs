use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::{info, warn};

use token_price_explorer::config::Config;
use token_price_explorer::constants::{DISPLAY_LIMIT, POPULAR_TOKENS};
use token_price_explorer::convert::ConverterSession;
use token_price_explorer::logging;
use token_price_explorer::price::{self, RequestThrottle};
use token_price_explorer::token::token_search::{filtered_tokens, search_tokens, sort_by_popularity, top_tokens};
use token_price_explorer::token::{Token, TokenCatalog, chain_name};

#[derive(Debug, Parser)]
#[command(name = "explorer", about = "Search allow-listed tokens and convert USD amounts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search tokens by symbol or name
    Search {
        #[arg(default_value = "")]
        term: String,
        #[arg(long)]
        chain: Option<u64>,
        #[arg(long, default_value_t = DISPLAY_LIMIT)]
        limit: usize,
    },
    /// Default token list shown for an empty search
    Top {
        #[arg(long, default_value_t = DISPLAY_LIMIT)]
        limit: usize,
    },
    /// Fetch one token's USD price
    Price {
        symbol: String,
        #[arg(long, default_value_t = 1)]
        chain: u64,
    },
    /// Fetch prices for several tokens (popular tokens when none are given)
    Prices {
        symbols: Vec<String>,
        #[arg(long)]
        chain: Option<u64>,
    },
    /// Convert a USD amount into two tokens
    Convert {
        usd: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long, default_value_t = 1)]
        chain: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so .env levels apply
    let cfg = Config::load()?;

    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }
    info!(price_source = %cfg.price_source_mode, "Configuration loaded and logging initialized");

    let catalog = TokenCatalog::load_from_file(&cfg.token_data_path)?;

    match cli.command {
        Command::Search { term, chain, limit } => {
            let results = match chain {
                Some(chain_id) => sort_by_popularity(&search_tokens(&catalog, &term, Some(chain_id)), &POPULAR_TOKENS),
                None => filtered_tokens(&catalog, &term),
            };
            println!("{} matches", results.len());
            results.iter().take(limit).for_each(print_token);
        }
        Command::Top { limit } => {
            top_tokens(&catalog, limit, &mut rand::rng()).iter().for_each(print_token);
        }
        Command::Price { symbol, chain } => {
            let Some(token) = resolve_token(&catalog, &symbol, Some(chain)) else {
                println!("{} is not an allowed token on {}", symbol, chain_name(chain));
                return Ok(());
            };
            let source = price::build_price_source(&cfg)?;
            let token_price = price::fetch_token_price(source.as_ref(), &token).await;
            println!("{}", format_price_line(&token, token_price));
        }
        Command::Prices { symbols, chain } => {
            let symbols = if symbols.is_empty() {
                POPULAR_TOKENS.iter().map(|s| s.to_string()).collect()
            } else {
                symbols
            };
            let tokens: Vec<Token> = symbols
                .iter()
                .filter_map(|symbol| resolve_token(&catalog, symbol, chain))
                .collect();

            let source = price::build_price_source(&cfg)?;
            let throttle = RequestThrottle::new(cfg.request_spacing);
            for outcome in price::fetch_token_prices(source.as_ref(), &throttle, &tokens).await {
                println!("{}", format_price_line(&outcome.token, outcome.price));
            }
        }
        Command::Convert { usd, from, to, chain } => {
            let source = price::build_price_source(&cfg)?;
            let mut session = ConverterSession::new(source);
            if from.is_none() || to.is_none() {
                session.initialize(&catalog).await;
            }
            if let Some(token) = from.and_then(|symbol| resolve_token(&catalog, &symbol, Some(chain))) {
                session.select_source(token).await;
            }
            if let Some(token) = to.and_then(|symbol| resolve_token(&catalog, &symbol, Some(chain))) {
                session.select_target(token).await;
            }
            session.set_usd_amount(&usd);

            match session.quote() {
                Some(quote) => println!("{}", quote),
                None => println!("Select two tokens to convert between"),
            }
        }
    }

    Ok(())
}

// Symbol on the given chain, otherwise an exact symbol/name match anywhere in the catalog
fn resolve_token(catalog: &TokenCatalog, input: &str, chain: Option<u64>) -> Option<Token> {
    let found = match chain {
        Some(chain_id) => catalog.find_by_symbol_and_chain(input.trim(), chain_id),
        None => catalog.parse_token_input(input),
    };
    if found.is_none() {
        warn!(input = %input, chain_id = ?chain, "Token not found in catalog");
    }
    found.cloned()
}

fn print_token(token: &Token) {
    println!(
        "{:<8} {:<28} {:<10} {}",
        token.symbol,
        token.name,
        chain_name(token.chain_id),
        token.address
    );
}

fn format_price_line(token: &Token, price: Option<f64>) -> String {
    match price {
        Some(price) => format!("{:<8} {:<10} ${:.2}", token.symbol, chain_name(token.chain_id), price),
        None => format!("{:<8} {:<10} unknown", token.symbol, chain_name(token.chain_id)),
    }
}
