use crate::error::ScoutError;
use async_trait::async_trait;

/// Common trait for listing marker sources
#[async_trait]
pub trait OfferScraper: Send + Sync {
    /// Issue one markers request and return the raw response body
    async fn fetch_markers(&self) -> Result<String, ScoutError>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
