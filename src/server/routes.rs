use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::state::AppState;
use crate::token::is_valid_token_address;

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub address: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/proxy", get(proxy_price))
        .route("/health", get(health))
}

fn failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to fetch data" })),
    )
}

/// Forwards to the price API and relays its JSON body verbatim with status 200.
async fn proxy_price(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProxyQuery>, QueryRejection>,
) -> (StatusCode, Json<Value>) {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected proxy request with bad query");
            return failure();
        }
    };
    if !is_valid_token_address(&query.address) {
        warn!(address = %query.address, "Rejected proxy request with invalid address");
        return failure();
    }

    match state.upstream.fetch_raw(query.chain_id, &query.address).await {
        Ok((upstream_status, body)) => {
            debug!(
                chain_id = query.chain_id,
                address = %query.address,
                upstream_status,
                "Relayed price response"
            );
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            error!(chain_id = query.chain_id, address = %query.address, error = %e, "Proxy error");
            failure()
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "started_at": state.startup_time.to_rfc3339(),
    }))
}
