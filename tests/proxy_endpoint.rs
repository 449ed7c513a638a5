mod common;

use common::{BROKEN, ETH, NOT_JSON, get_json, spawn_proxy, spawn_upstream};
use serde_json::json;

#[tokio::test]
async fn relays_upstream_body_verbatim() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    let (status, body) = get_json(&format!("{}/proxy?chainId=1&address={}", proxy, ETH)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "unitPrice": 2500.5, "amount": 1, "total": "2500.50" }));
}

#[tokio::test]
async fn relays_malformed_price_without_interpreting_it() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    let (status, body) = get_json(&format!("{}/proxy?chainId=1&address={}", proxy, BROKEN)).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "total": "abc" }));
}

#[tokio::test]
async fn upstream_error_json_is_relayed_with_ok_status() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    let (status, body) = get_json(&format!(
        "{}/proxy?chainId=137&address=0x3333333333333333333333333333333333333333",
        proxy
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Asset not found" }));
}

#[tokio::test]
async fn non_json_upstream_is_a_generic_error() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    let (status, body) = get_json(&format!("{}/proxy?chainId=1&address={}", proxy, NOT_JSON)).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to fetch data" }));
}

#[tokio::test]
async fn unreachable_upstream_is_a_generic_error() {
    // Nothing listens on port 9 of localhost
    let proxy = spawn_proxy("http://127.0.0.1:9/price").await;

    let (status, body) = get_json(&format!("{}/proxy?chainId=1&address={}", proxy, ETH)).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to fetch data" }));
}

#[tokio::test]
async fn bad_query_parameters_are_a_generic_error() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    for query in ["", "?chainId=1", "?chainId=abc&address=0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE", "?chainId=1&address=0x12"] {
        let (status, body) = get_json(&format!("{}/proxy{}", proxy, query)).await;
        assert_eq!(status, 500, "query {:?}", query);
        assert_eq!(body, json!({ "error": "Failed to fetch data" }));
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let proxy = spawn_proxy(&spawn_upstream().await).await;

    let (status, body) = get_json(&format!("{}/health", proxy)).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["started_at"].is_string());
}
