pub mod routes;
pub mod state;

use axum::Router;
use eyre::{Result, WrapErr};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::Config;
use crate::price::FunkitClient;
pub use state::AppState;

/// Binds the configured address and serves until ctrl-c.
#[instrument(skip(config), fields(bind_addr = %config.proxy_bind_addr))]
pub async fn start_server(config: &Config) -> Result<()> {
    let upstream = FunkitClient::from_config(config)?;
    let state = Arc::new(AppState::new(upstream));

    let listener = TcpListener::bind(config.proxy_bind_addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {}", config.proxy_bind_addr))?;
    info!(addr = %config.proxy_bind_addr, "Price proxy listening");

    serve(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal, stopping price proxy");
    })
    .await
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .wrap_err("Price proxy server error")?;
    info!("Price proxy stopped");
    Ok(())
}

pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
}
