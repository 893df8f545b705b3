//! Client, executor, and pagination tests against a mocked HTTP server.

use std::sync::Once;

use async_trait::async_trait;
use futures_util::StreamExt;
use mockito::{Matcher, Server, ServerGuard};
use rust_decimal_macros::dec;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use robinhood_rs::auth::{Credentials, Token, TokenSource};
use robinhood_rs::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A source with a fixed token; no network, no cache.
struct StaticSource;

#[async_trait]
impl TokenSource for StaticSource {
    async fn token(&self) -> Result<Token> {
        Ok(Token::new("test-access", "test-refresh"))
    }
}

fn account_page() -> String {
    json!({
        "results": [{
            "url": "https://api.robinhood.com/accounts/5RH12345/",
            "account_number": "5RH12345",
            "type": "margin",
            "buying_power": "2500.0000",
            "cash": "1000.0000"
        }],
        "next": null
    })
    .to_string()
}

fn order_json(id: &str) -> serde_json::Value {
    json!({
        "cancel_url": null,
        "canceled_quantity": "0.00000",
        "created_at": "2018-09-06T14:48:20.305171Z",
        "direction": "credit",
        "id": id,
        "legs": [],
        "pending_quantity": "0.00000",
        "premium": "45.00000000",
        "processed_premium": "90.00000000000000000",
        "price": "0.45000000",
        "processed_quantity": "2.00000",
        "quantity": "2.00000",
        "ref_id": "ref-1",
        "state": "filled",
        "time_in_force": "gfd",
        "trigger": "immediate",
        "type": "limit",
        "updated_at": "2019-01-01T14:48:29.835760Z",
        "chain_id": "chain-1",
        "chain_symbol": "AMD",
        "response_category": null,
        "opening_strategy": null,
        "closing_strategy": null,
        "stop_price": null
    })
}

/// Dial a client against the mock server, mocking the `/accounts/` handshake.
async fn dial_mocked(server: &mut ServerGuard) -> RobinhoodClient {
    init_logging();

    let _accounts = server
        .mock("GET", "/accounts/")
        .match_header("authorization", "Bearer test-access")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(account_page())
        .create_async()
        .await;

    let config = ClientConfig::default().with_base_url(server.url());
    RobinhoodClient::dial_with_config(StaticSource, config)
        .await
        .expect("dial should succeed against mocked accounts endpoint")
}

// ============================================================================
// DIAL / HANDSHAKE
// ============================================================================

#[tokio::test]
async fn dial_loads_first_account() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    let account = client.account().expect("account loaded at dial");
    assert_eq!(account.account_number, "5RH12345");
    assert_eq!(account.buying_power, Some(dec!(2500)));
}

// ============================================================================
// MFA CHALLENGE FLOW
// ============================================================================

#[tokio::test]
async fn mfa_challenge_then_success() {
    init_logging();

    // First attempt: the identity service demands a second factor.
    let mut challenge_server = Server::new_async().await;
    let challenge_mock = challenge_server
        .mock("POST", "/oauth2/token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"mfa_required": true, "mfa_type": "sms"}"#)
        .create_async()
        .await;

    let creds = Credentials::new("user@example.com", "hunter2")
        .with_endpoint(format!("{}/oauth2/token/", challenge_server.url()));

    let err = creds.token().await.unwrap_err();
    assert!(err.is_missing_mfa());
    assert!(err.is_auth_error());
    challenge_mock.assert_async().await;

    // Second attempt supplies the code and succeeds.
    let mut grant_server = Server::new_async().await;
    let grant_mock = grant_server
        .mock("POST", "/oauth2/token/")
        .match_body(Matcher::PartialJson(json!({
            "mfa_code": "123456",
            "grant_type": "password"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "access_token": "granted-access",
                "refresh_token": "granted-refresh",
                "token_type": "Bearer",
                "expires_in": 86400
            }"#,
        )
        .create_async()
        .await;

    let creds = Credentials::new("user@example.com", "hunter2")
        .with_mfa("123456")
        .with_endpoint(format!("{}/oauth2/token/", grant_server.url()));

    let token = creds.token().await.unwrap();
    assert!(token.is_usable());
    assert_eq!(token.access_token, "granted-access");
    assert!(token.expiry.is_some());
    grant_mock.assert_async().await;
}

#[tokio::test]
async fn repeated_logins_reuse_the_same_source() {
    init_logging();

    let mut server = Server::new_async().await;
    let grant = server
        .mock("POST", "/oauth2/token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "a", "refresh_token": "r"}"#)
        .expect(2)
        .create_async()
        .await;

    let creds = Credentials::new("user@example.com", "hunter2")
        .with_endpoint(format!("{}/oauth2/token/", server.url()));

    let first = creds.token().await.unwrap();
    let second = creds.token().await.unwrap();
    assert_eq!(first.access_token, second.access_token);
    grant.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_surface_status_and_body() {
    init_logging();

    let mut server = Server::new_async().await;
    server
        .mock("POST", "/oauth2/token/")
        .with_status(400)
        .with_body(r#"{"error": "invalid_grant"}"#)
        .create_async()
        .await;

    let creds = Credentials::new("user@example.com", "wrong")
        .with_endpoint(format!("{}/oauth2/token/", server.url()));

    let err = creds.token().await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(!err.is_missing_mfa());
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("invalid_grant"));
}

// ============================================================================
// REQUEST EXECUTOR
// ============================================================================

#[tokio::test]
async fn api_error_carries_status_and_body() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    server
        .mock("GET", "/positions/")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = client.positions().list().await.unwrap_err();
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    server
        .mock("GET", "/positions/")
        .with_status(200)
        .with_body("this is not json")
        .create_async()
        .await;

    let err = client.positions().list().await.unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {:?}", err);
}

#[tokio::test]
async fn nonzero_filter_is_encoded_in_query() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    let filtered = server
        .mock("GET", "/positions/")
        .match_query(Matcher::UrlEncoded("nonzero".into(), "True".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [], "next": null}"#)
        .create_async()
        .await;

    let positions = client
        .positions()
        .list_with(PositionParams::nonzero())
        .await
        .unwrap();
    assert!(positions.is_empty());
    filtered.assert_async().await;
}

#[tokio::test]
async fn place_order_posts_wire_format_body() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    let placed = server
        .mock("POST", "/options/orders/")
        .match_header("authorization", "Bearer test-access")
        .match_body(Matcher::PartialJson(json!({
            "account": "https://api.robinhood.com/accounts/5RH12345/",
            "direction": "debit",
            "quantity": "2",
            "price": "0.45",
            "trigger": "immediate",
            "type": "limit",
            "legs": [{
                "option": "https://api.robinhood.com/options/instruments/abc/",
                "position_effect": "open",
                "ratio_quantity": "1",
                "side": "buy"
            }]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(order_json("created-1").to_string())
        .create_async()
        .await;

    let opts = OptionOrderOpts {
        quantity: dec!(2),
        price: dec!(0.45),
        side: OrderSide::Buy,
        ..Default::default()
    };
    let response = client
        .orders()
        .place("https://api.robinhood.com/options/instruments/abc/", opts)
        .await
        .unwrap();

    assert_eq!(response["id"], "created-1");
    placed.assert_async().await;
}

// ============================================================================
// CURSOR ITERATOR
// ============================================================================

#[tokio::test]
async fn iterator_walks_three_pages_in_order() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;
    let base = server.url();

    let page1 = server
        .mock("GET", "/options/orders/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [order_json("o1")],
                "next": format!("{base}/options/orders/page2/")
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/options/orders/page2/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [order_json("o2")],
                "next": format!("{base}/options/orders/page3/")
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let page3 = server
        .mock("GET", "/options/orders/page3/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": [order_json("o3")], "next": null }).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut orders = client.orders().iter_options();
    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(orders.has_next());
        let page = orders.next_page().await.unwrap();
        assert_eq!(page.len(), 1);
        seen.push(page[0].id.as_str().to_string());
    }

    assert_eq!(seen, vec!["o1", "o2", "o3"]);
    assert!(!orders.has_next());

    // Advancing past the end is a caller error and hits no endpoint.
    let err = orders.next_page().await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
}

#[tokio::test]
async fn empty_string_next_terminates_iteration() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    server
        .mock("GET", "/options/orders/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": [order_json("only")], "next": "" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut orders = client.orders().iter_options();
    assert!(orders.has_next());
    let page = orders.next_page().await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(!orders.has_next());
}

#[tokio::test]
async fn failed_fetch_leaves_cursor_in_place() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;

    server
        .mock("GET", "/options/orders/")
        .with_status(503)
        .with_body("maintenance")
        .expect(2)
        .create_async()
        .await;

    let mut orders = client.orders().iter_options();
    assert!(orders.next_page().await.is_err());

    // The cursor did not advance; the same page can be requested again.
    assert!(orders.has_next());
    assert!(orders.next_page().await.is_err());
}

#[tokio::test]
async fn stream_yields_items_across_pages() {
    let mut server = Server::new_async().await;
    let client = dial_mocked(&mut server).await;
    let base = server.url();

    server
        .mock("GET", "/options/orders/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [order_json("s1"), order_json("s2")],
                "next": format!("{base}/options/orders/page2/")
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/options/orders/page2/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "results": [order_json("s3")], "next": null }).to_string())
        .create_async()
        .await;

    let mut stream = client.orders().iter_options().into_stream();
    let mut ids = Vec::new();
    while let Some(order) = stream.next().await {
        ids.push(order.unwrap().id.as_str().to_string());
    }
    assert_eq!(ids, vec!["s1", "s2", "s3"]);
}
