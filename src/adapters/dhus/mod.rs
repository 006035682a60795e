//! Copernicus Open Access Hub (DHuS) adapter.
//!
//! Implements the [`SearchApi`](crate::domain::ports::SearchApi) port over
//! the hub's OpenSearch endpoint: query string construction, paging and
//! flattening of the JSON feed into raw product attributes.

pub mod client;
pub mod models;
pub mod query;

pub use client::DhusClient;
