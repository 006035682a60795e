//! Service layer: coordinates the credentials store and the search port.

pub mod data_search;

pub use data_search::{DataSearchConnector, ARCHIVE_EPOCH};
