//! EarthPicture - Copernicus Open Access Hub search client
//!
//! EarthPicture keeps provider credentials in a local JSON store and uses the
//! `Copernicus` entry to query the hub for satellite products by mission,
//! acquisition dates, area of interest and cloud cover.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the search port
//! - **Service Layer** (`services`): The data search connector
//! - **Adapters** (`adapters`): The DHuS OpenSearch HTTP client
//! - **Infrastructure Layer** (`infrastructure`): Credentials store, config and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use earthpicture::{CredentialsStore, DataSearchConnector, HubConfig, SearchFilter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = CredentialsStore::open("credentials_config.json")?;
//!     let connector = DataSearchConnector::new(&store, &HubConfig::default())?;
//!     let filter = SearchFilter::new(
//!         "Sentinel-2",
//!         NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
//!     )
//!     .with_max_cloud_cover(20);
//!     for product in connector.search_data(&filter).await? {
//!         println!("{} {}", product.title, product.cloudcoverpercentage);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::dhus::DhusClient;
pub use domain::models::{
    AreaOfInterest, CloudCover, Config, Coordinate, Credentials, Footprint, HubConfig,
    LoggingConfig, ProductQuery, ProductRecord, RawProduct, SearchFilter, COPERNICUS_PROVIDER,
};
pub use domain::ports::SearchApi;
pub use domain::{CredentialsError, SearchApiError, SearchError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::credentials::CredentialsStore;
pub use infrastructure::logging::LoggerImpl;
pub use services::DataSearchConnector;
