use async_trait::async_trait;

use crate::domain::errors::SearchApiError;
use crate::domain::models::{ProductQuery, RawProduct};

/// Port for a satellite product search hub.
///
/// Implementations own authentication, transport and paging. Results are
/// returned in the hub's native order.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Execute a structured query and return every matching product.
    async fn query(&self, query: &ProductQuery) -> Result<Vec<RawProduct>, SearchApiError>;
}
