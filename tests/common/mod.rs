#![allow(dead_code)]

use axum::{
    Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use token_price_explorer::price::FunkitClient;
use token_price_explorer::server::{self, AppState};
use token_price_explorer::token::Token;

pub const API_KEY: &str = "test-key";
pub const ETH: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
pub const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
pub const BROKEN: &str = "0x1111111111111111111111111111111111111111";
pub const NOT_JSON: &str = "0x2222222222222222222222222222222222222222";

pub fn token(symbol: &str, chain_id: u64, address: &str) -> Token {
    Token {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        chain_id,
        address: address.to_string(),
    }
}

// Stand-in for the Funkit price endpoint
async fn fake_price(Path((chain_id, address)): Path<(u64, String)>, headers: HeaderMap) -> (StatusCode, String) {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }).to_string());
    }
    let body = match (chain_id, address.to_lowercase()) {
        (1, a) if a == ETH.to_lowercase() => json!({ "unitPrice": 2500.5, "amount": 1, "total": "2500.50" }),
        (1, a) if a == USDT.to_lowercase() => json!({ "unitPrice": 1.0, "amount": 1, "total": 1.0 }),
        (1, a) if a == BROKEN.to_lowercase() => json!({ "total": "abc" }),
        (1, a) if a == NOT_JSON.to_lowercase() => return (StatusCode::OK, "<html>gateway</html>".to_string()),
        _ => return (StatusCode::NOT_FOUND, json!({ "message": "Asset not found" }).to_string()),
    };
    (StatusCode::OK, body.to_string())
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Base URL of a fake upstream price API.
pub async fn spawn_upstream() -> String {
    let app = Router::new().route("/price/:chain_id/:address", get(fake_price));
    let addr = spawn(app).await;
    format!("http://{}/price", addr)
}

/// Base URL (`.../api`) of a proxy server forwarding to `upstream_base`.
pub async fn spawn_proxy(upstream_base: &str) -> String {
    let upstream = FunkitClient::new(upstream_base, API_KEY.to_string()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(upstream));
    tokio::spawn(async move {
        server::serve(listener, state, std::future::pending()).await.unwrap();
    });
    format!("http://{}/api", addr)
}

pub async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

