//! Domain models.

pub mod config;
pub mod credentials;
pub mod footprint;
pub mod search;

pub use config::{Config, HubConfig, LogFormat, LoggingConfig, RotationPolicy};
pub use credentials::{Credentials, COPERNICUS_PROVIDER};
pub use footprint::{AreaOfInterest, Coordinate, Footprint};
pub use search::{
    CloudCover, CloudCoverRange, DateRange, ProductQuery, ProductRecord, RawProduct, SearchFilter,
};
