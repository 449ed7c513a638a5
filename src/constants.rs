// Funkit price API
pub const FUNKIT_PRICE_ENDPOINT: &str = "https://api.fun.xyz/v1/asset/erc20/price";
pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_PROXY_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_TOKEN_DATA_PATH: &str = "data/allowed_tokens.json";

pub const HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_SPACING_MS: u64 = 1000; // Minimum gap between outbound price requests

// Token lists
pub const DISPLAY_LIMIT: usize = 25;
pub const POPULAR_TOKENS: [&str; 10] = ["ETH", "USDT", "USDC", "WBTC", "DAI", "MATIC", "WETH", "UNI", "AAVE", "LINK"];
pub const PRIORITY_TOKENS: [&str; 5] = ["ETH", "WBTC", "LINK", "1INCH", "MATIC"];

// Converter defaults
pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_SOURCE_SYMBOL: &str = "ETH";
pub const DEFAULT_TARGET_SYMBOL: &str = "USDT";
pub const AMOUNT_DECIMALS: usize = 5;
