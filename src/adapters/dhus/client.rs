//! DHuS HTTP client.
//!
//! Authenticates with HTTP basic auth and pages through the OpenSearch
//! `/search` endpoint. Requests are not retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::domain::errors::SearchApiError;
use crate::domain::models::{HubConfig, ProductQuery, RawProduct};
use crate::domain::ports::SearchApi;

use super::models::DhusSearchResponse;
use super::query::format_query;

/// One page of flattened results plus the hub's reported total.
struct Page {
    products: Vec<RawProduct>,
    total: Option<usize>,
}

/// Authenticated client for the Copernicus Open Access Hub.
#[derive(Clone)]
pub struct DhusClient {
    http: Client,
    search_url: String,
    username: String,
    password: String,
    page_size: u32,
}

impl std::fmt::Debug for DhusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhusClient")
            .field("search_url", &self.search_url)
            .field("username", &self.username)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl DhusClient {
    /// Create a client for the hub described by `config`.
    pub fn new(
        config: &HubConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SearchApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("earthpicture/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
            username: username.into(),
            password: password.into(),
            page_size: config.page_size.max(1),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    async fn fetch_page(&self, q: &str, start: usize) -> Result<Page, SearchApiError> {
        let rows = self.page_size.to_string();
        let start_param = start.to_string();
        let resp = self
            .http
            .get(&self.search_url)
            .basic_auth(&self.username, Some(&self.password))
            .query(&[
                ("q", q),
                ("format", "json"),
                ("rows", rows.as_str()),
                ("start", start_param.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SearchApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: DhusSearchResponse = serde_json::from_str(&body)
            .map_err(|e| SearchApiError::Parse(format!("invalid search response: {e}")))?;
        let total = parsed.feed.total();
        let products = parsed.feed.into_products()?;

        debug!(start, received = products.len(), ?total, "fetched search page");
        Ok(Page { products, total })
    }
}

#[async_trait]
impl SearchApi for DhusClient {
    #[instrument(skip(self, query), fields(url = %self.search_url))]
    async fn query(&self, query: &ProductQuery) -> Result<Vec<RawProduct>, SearchApiError> {
        let q = format_query(query);
        debug!(q = %q, "querying hub");

        let mut products = Vec::new();
        loop {
            let page = self.fetch_page(&q, products.len()).await?;
            let received = page.products.len();
            products.extend(page.products);

            let done = match page.total {
                Some(total) => products.len() >= total,
                None => true,
            };
            if received == 0 || done {
                break;
            }
        }

        debug!(count = products.len(), "query complete");
        Ok(products)
    }
}
