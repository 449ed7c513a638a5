mod common;

use common::{API_KEY, BROKEN, ETH, USDT, spawn_proxy, spawn_upstream, token};
use std::sync::Arc;
use std::time::Duration;

use token_price_explorer::config::{Config, PriceSourceMode};
use token_price_explorer::convert::ConverterSession;
use token_price_explorer::price::{
    self, FunkitClient, PriceBook, PriceSource, ProxyClient, RequestThrottle, fetch_token_price, fetch_token_prices,
};
use token_price_explorer::token::TokenCatalog;

#[tokio::test]
async fn direct_client_reads_total() {
    let upstream = spawn_upstream().await;
    let client = FunkitClient::new(&upstream, API_KEY.to_string()).unwrap();

    let info = client.fetch_price_info(1, ETH).await.unwrap();
    assert_eq!(info.usd_price(), Some(2500.50));
    assert_eq!(fetch_token_price(&client, &token("USDT", 1, USDT)).await, Some(1.0));
}

#[tokio::test]
async fn direct_client_treats_error_status_as_unknown() {
    let upstream = spawn_upstream().await;
    let wrong_key = FunkitClient::new(&upstream, "wrong".to_string()).unwrap();
    assert!(wrong_key.fetch_price_info(1, ETH).await.is_err());
    assert_eq!(fetch_token_price(&wrong_key, &token("ETH", 1, ETH)).await, None);
}

#[tokio::test]
async fn proxy_client_goes_through_pass_through_endpoint() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;
    let client = ProxyClient::new(&proxy).unwrap();

    assert_eq!(fetch_token_price(&client, &token("ETH", 1, ETH)).await, Some(2500.50));
    assert_eq!(fetch_token_price(&client, &token("BRK", 1, BROKEN)).await, None);
}

#[tokio::test]
async fn configured_proxy_mode_prices_a_batch_end_to_end() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;
    let cfg = Config::from_lookup(|key| match key {
        "PRICE_SOURCE" => Some("proxy".to_string()),
        "PROXY_BASE_URL" => Some(proxy.clone()),
        "PRICE_REQUEST_SPACING_MS" => Some("20".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.price_source_mode, PriceSourceMode::Proxy);

    let source = price::build_price_source(&cfg).unwrap();
    assert_eq!(source.name(), "proxy");

    let tokens = vec![
        token("ETH", 1, ETH),
        token("BRK", 1, BROKEN),
        token("USDT", 1, USDT),
        token("GONE", 10, ETH),
    ];
    let throttle = RequestThrottle::new(cfg.request_spacing);
    assert_eq!(throttle.spacing(), Duration::from_millis(20));

    let outcomes = fetch_token_prices(source.as_ref(), &throttle, &tokens).await;
    let prices: Vec<_> = outcomes.iter().map(|o| o.price).collect();
    assert_eq!(prices, vec![Some(2500.50), None, Some(1.0), None]);

    let mut book = PriceBook::new();
    assert_eq!(book.record_outcomes(&outcomes), 2);
    assert_eq!(book.price_for_symbol("ETH"), Some(2500.50));
}

#[tokio::test]
async fn converter_runs_against_direct_source() {
    let upstream = spawn_upstream().await;
    let source: Arc<dyn PriceSource> = Arc::new(FunkitClient::new(&upstream, API_KEY.to_string()).unwrap());
    let catalog = TokenCatalog::from_tokens(vec![token("ETH", 1, ETH), token("USDT", 1, USDT)]).unwrap();

    let mut session = ConverterSession::new(source);
    session.initialize(&catalog).await;
    session.set_usd_amount("1000");

    let quote = session.quote().unwrap();
    assert_eq!(quote.source_amount, "0.39992");
    assert_eq!(quote.target_amount, "1000.00000");
    assert_eq!(quote.target_unit_price, "1 USDT = $1.00");
}
