use tracing::{error, info, instrument};

use token_price_explorer::config::Config;
use token_price_explorer::logging;
use token_price_explorer::server;

#[instrument(name = "price_proxy_main")]
#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cfg = Config::load()?;

    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }
    info!(
        bind_addr = %cfg.proxy_bind_addr,
        upstream = %cfg.price_api_base_url,
        "Configuration loaded and logging initialized"
    );

    if let Err(e) = server::start_server(&cfg).await {
        error!(error = ?e, "Price proxy exited with error");
        return Err(e);
    }
    Ok(())
}
