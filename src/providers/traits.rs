use crate::error::Result;
use crate::models::Listing;
use crate::providers::types::Query;
use async_trait::async_trait;

/// Common trait for all listing providers
/// This allows adding new sources without touching the callers
#[async_trait]
pub trait Repository: Send + Sync {
    /// Search the provider, returning listings in the order the provider sent them
    async fn search(&self, query: &Query) -> Result<Vec<Listing>>;

    /// Get the name of the provider
    fn source_name(&self) -> &'static str;
}
