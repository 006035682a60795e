//! Integration tests for the DHuS hub client
//!
//! These tests run the client against a mockito server.
//!
//! Test coverage:
//! - Basic auth header and OpenSearch query parameters
//! - Paging until the reported total is reached
//! - Single-entry and empty feeds
//! - Error classification (401, 5xx, malformed body)

mod common;

use chrono::NaiveDate;
use common::{hub_entry, hub_page};
use earthpicture::domain::models::{CloudCoverRange, DateRange};
use earthpicture::{DhusClient, HubConfig, ProductQuery, SearchApi, SearchApiError};
use mockito::{Matcher, Server};
use serde_json::json;

/// "user:pass" base64-encoded.
const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

fn client_for(server: &Server, page_size: u32) -> DhusClient {
    let config = HubConfig {
        base_url: server.url(),
        page_size,
        timeout_secs: 5,
    };
    DhusClient::new(&config, "user", "pass").expect("Failed to create client")
}

fn january_query() -> ProductQuery {
    ProductQuery {
        platform_name: Some("Sentinel-2".to_string()),
        dates: Some(DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        )),
        cloud_cover: Some(CloudCoverRange { min: 0, max: 30 }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_query_sends_auth_and_search_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_header("authorization", BASIC_AUTH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "q".into(),
                "beginPosition:[2023-01-01T00:00:00.000Z TO 2023-01-31T23:59:59.999Z] \
                 AND platformname:Sentinel-2 AND cloudcoverpercentage:[0 TO 30]"
                    .into(),
            ),
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("rows".into(), "100".into()),
            Matcher::UrlEncoded("start".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(hub_page(1, vec![hub_entry("uuid-1", "S2A_one", "12.5")]))
        .create_async()
        .await;

    let products = client_for(&server, 100)
        .query(&january_query())
        .await
        .expect("query failed");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].key, "uuid-1");
    assert_eq!(products[0].attributes["title"], json!("S2A_one"));
    assert_eq!(products[0].attributes["cloudcoverpercentage"], json!(12.5));
    assert_eq!(products[0].platform_name(), Some("Sentinel-2"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_pages_until_total() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("rows".into(), "2".into()),
            Matcher::UrlEncoded("start".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(hub_page(
            3,
            vec![hub_entry("a", "first", "1"), hub_entry("b", "second", "2")],
        ))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("rows".into(), "2".into()),
            Matcher::UrlEncoded("start".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(hub_page(3, vec![hub_entry("c", "third", "3")]))
        .expect(1)
        .create_async()
        .await;

    let products = client_for(&server, 2)
        .query(&ProductQuery::default())
        .await
        .unwrap();

    let keys: Vec<&str> = products.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_query_single_entry_object() {
    let mut server = Server::new_async().await;
    let body = json!({
        "feed": {
            "opensearch:totalResults": "1",
            "entry": hub_entry("only", "S1A_only", "0")
        }
    });
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let products = client_for(&server, 100)
        .query(&ProductQuery::default())
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].key, "only");
}

#[tokio::test]
async fn test_query_empty_feed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "*".into()))
        .with_status(200)
        .with_body(hub_page(0, Vec::new()))
        .expect(1)
        .create_async()
        .await;

    let products = client_for(&server, 100)
        .query(&ProductQuery::default())
        .await
        .unwrap();

    assert!(products.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let err = client_for(&server, 100)
        .query(&ProductQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchApiError::Unauthorized));
}

#[tokio::test]
async fn test_server_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = client_for(&server, 100)
        .query(&ProductQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchApiError::Status { status: 500, ref body } if body == "internal error"
    ));
}

#[tokio::test]
async fn test_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client_for(&server, 100)
        .query(&ProductQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchApiError::Parse(_)));
}
