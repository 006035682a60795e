//! Common test utilities for integration tests
//!
//! Provides hub response fixtures and store helpers shared across
//! integration test files.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use earthpicture::{
    Credentials, CredentialsStore, ProductQuery, RawProduct, SearchApi, SearchApiError,
    COPERNICUS_PROVIDER,
};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create an empty store in a fresh temporary directory.
pub fn temp_store() -> (TempDir, CredentialsStore) {
    let dir = temp_dir();
    let store = CredentialsStore::open(dir.path().join("credentials_config.json"))
        .expect("Failed to create store");
    (dir, store)
}

/// Create a store holding Copernicus credentials `user` / `pass`.
pub fn store_with_copernicus() -> (TempDir, CredentialsStore) {
    let (dir, store) = temp_store();
    store
        .set_credentials(COPERNICUS_PROVIDER, Credentials::basic("user", "pass"))
        .expect("Failed to store credentials");
    (dir, store)
}

/// Build a flattened product the way the hub adapter would.
pub fn raw_product(key: &str, attributes: Value) -> RawProduct {
    match attributes {
        Value::Object(map) => RawProduct::new(key, map),
        _ => panic!("attributes must be a JSON object"),
    }
}

/// A complete product with every field the connector shapes.
pub fn full_product(key: &str, title: &str, cloud: Option<f64>) -> RawProduct {
    let mut attrs = json!({
        "title": title,
        "beginposition": "2023-01-01T10:00:00.000Z",
        "endposition": "2023-01-01T10:00:25.000Z",
        "size": "790.12 MB",
        "uuid": key,
        "platformname": "Sentinel-2",
    });
    if let Some(cloud) = cloud {
        attrs["cloudcoverpercentage"] = json!(cloud);
    }
    raw_product(key, attrs)
}

/// Products from three missions, with repeats.
pub fn mission_fixture() -> Vec<RawProduct> {
    ["Sentinel-1", "Sentinel-2", "Sentinel-2", "Sentinel-3", "Sentinel-1"]
        .iter()
        .enumerate()
        .map(|(i, platform)| {
            raw_product(&format!("p{i}"), json!({ "platformname": platform }))
        })
        .collect()
}

/// One hub entry in the DHuS JSON shape.
pub fn hub_entry(id: &str, title: &str, cloud: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "summary": "Date: 2023-01-01T10:00:00.000Z, Instrument: MSI",
        "date": [
            {"name": "beginposition", "content": "2023-01-01T10:00:00.000Z"},
            {"name": "endposition", "content": "2023-01-01T10:00:25.000Z"}
        ],
        "double": {"name": "cloudcoverpercentage", "content": cloud},
        "str": [
            {"name": "size", "content": "790.12 MB"},
            {"name": "uuid", "content": id},
            {"name": "platformname", "content": "Sentinel-2"}
        ]
    })
}

/// A DHuS search response page.
pub fn hub_page(total: usize, entries: Vec<Value>) -> String {
    let mut feed = Map::new();
    feed.insert(
        "opensearch:totalResults".to_string(),
        Value::String(total.to_string()),
    );
    if !entries.is_empty() {
        feed.insert("entry".to_string(), Value::Array(entries));
    }
    json!({ "feed": feed }).to_string()
}

/// Search API double that records queries and replays a fixed result.
pub struct RecordingSearchApi {
    products: Vec<RawProduct>,
    pub queries: Mutex<Vec<ProductQuery>>,
}

impl RecordingSearchApi {
    pub fn new(products: Vec<RawProduct>) -> Self {
        Self {
            products,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn last_query(&self) -> ProductQuery {
        self.queries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no query recorded")
    }
}

#[async_trait]
impl SearchApi for RecordingSearchApi {
    async fn query(&self, query: &ProductQuery) -> Result<Vec<RawProduct>, SearchApiError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.products.clone())
    }
}

/// Search API double that always fails with a hub status error.
pub struct FailingSearchApi;

#[async_trait]
impl SearchApi for FailingSearchApi {
    async fn query(&self, _query: &ProductQuery) -> Result<Vec<RawProduct>, SearchApiError> {
        Err(SearchApiError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }
}
