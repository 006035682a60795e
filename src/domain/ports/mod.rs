//! Port trait definitions (Hexagonal Architecture)
//!
//! - SearchApi: satellite product search operations
//!
//! Adapters in `crate::adapters` implement these traits so the services
//! can be exercised without a live hub.

pub mod search_api;

pub use search_api::SearchApi;
