//! Data search connector.
//!
//! Builds hub queries from caller-facing filters and shapes the raw results
//! into [`ProductRecord`]s.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument};

use crate::adapters::dhus::DhusClient;
use crate::domain::errors::{CredentialsError, SearchError, SearchResult};
use crate::domain::models::{
    CloudCoverRange, DateRange, HubConfig, ProductQuery, ProductRecord, SearchFilter,
    COPERNICUS_PROVIDER,
};
use crate::domain::ports::SearchApi;
use crate::infrastructure::credentials::CredentialsStore;

/// First acquisition date covered by the hub archive.
pub const ARCHIVE_EPOCH: (i32, u32, u32) = (2014, 1, 1);

/// Search connector for the Copernicus Open Access Hub.
#[derive(Clone)]
pub struct DataSearchConnector {
    api: Arc<dyn SearchApi>,
}

impl std::fmt::Debug for DataSearchConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSearchConnector").finish_non_exhaustive()
    }
}

impl DataSearchConnector {
    /// Load `Copernicus` credentials from `store` and authenticate a hub client.
    pub fn new(store: &CredentialsStore, hub: &HubConfig) -> SearchResult<Self> {
        let credentials = store
            .get_credentials(COPERNICUS_PROVIDER)
            .map_err(|err| match err {
                CredentialsError::NotFound { .. } | CredentialsError::MissingStore { .. } => {
                    SearchError::Configuration(format!(
                        "{COPERNICUS_PROVIDER} credentials not found in '{}'. \
                         Set them with `earthpicture credentials set {COPERNICUS_PROVIDER}`",
                        store.path().display()
                    ))
                }
                other => SearchError::Credentials(other),
            })?;

        let (Some(username), Some(password)) = (credentials.username(), credentials.password())
        else {
            return Err(SearchError::Configuration(format!(
                "{COPERNICUS_PROVIDER} credentials must contain 'username' and 'password'"
            )));
        };

        let client = DhusClient::new(hub, username, password)?;
        info!(url = client.search_url(), "connected search client");
        Ok(Self::with_api(Arc::new(client)))
    }

    /// Use an already configured search API.
    pub fn with_api(api: Arc<dyn SearchApi>) -> Self {
        Self { api }
    }

    /// Distinct platform names with at least one product in the archive.
    ///
    /// The hub has no capability listing, so this queries the whole archive
    /// from [`ARCHIVE_EPOCH`] to today and deduplicates `platformname`.
    /// Expensive on large archives.
    #[instrument(skip(self))]
    pub async fn list_missions(&self) -> SearchResult<BTreeSet<String>> {
        let (y, m, d) = ARCHIVE_EPOCH;
        let epoch = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| SearchError::Configuration("invalid archive epoch".to_string()))?;
        let query = ProductQuery {
            dates: Some(DateRange::new(epoch, Utc::now().date_naive())),
            ..Default::default()
        };

        let products = self.api.query(&query).await?;
        let missions: BTreeSet<String> = products
            .iter()
            .filter_map(|p| {
                let name = p.platform_name();
                if name.is_none() {
                    debug!(key = %p.key, "product without platformname skipped");
                }
                name.map(str::to_string)
            })
            .collect();

        info!(products = products.len(), missions = missions.len(), "listed missions");
        Ok(missions)
    }

    /// Search products for `filter`, in hub order.
    ///
    /// Fails without partial results if any product lacks a required field.
    #[instrument(skip(self, filter), fields(mission = %filter.mission))]
    pub async fn search_data(&self, filter: &SearchFilter) -> SearchResult<Vec<ProductRecord>> {
        let query = Self::build_query(filter)?;
        let products = self.api.query(&query).await?;

        let records = products
            .iter()
            .map(ProductRecord::try_from)
            .collect::<SearchResult<Vec<_>>>()?;

        info!(count = records.len(), "search complete");
        Ok(records)
    }

    /// Translate caller-facing filters into a hub query.
    pub fn build_query(filter: &SearchFilter) -> SearchResult<ProductQuery> {
        let footprint = filter.area.footprint()?;
        let cloud_cover = filter
            .max_cloud_cover
            .map(CloudCoverRange::up_to)
            .transpose()?;

        debug!(
            footprint = footprint.as_ref().map(|f| f.as_wkt()),
            ?cloud_cover,
            "built search query"
        );

        Ok(ProductQuery {
            platform_name: Some(filter.mission.clone()),
            dates: Some(filter.dates),
            footprint,
            cloud_cover,
        })
    }
}
