use crate::models::{Listing, MarketStats};
use crate::providers::ProviderError;
use async_trait::async_trait;

/// Common trait for everything that can supply market data
/// The live listings API and the bundled fallback dataset both implement it
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current listing snapshot, already normalized to a flat sequence
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ProviderError>;

    /// A single listing by id
    async fn fetch_listing(&self, id: u64) -> Result<Listing, ProviderError>;

    /// Market-wide totals and per-city aggregates
    async fn fetch_stats(&self) -> Result<MarketStats, ProviderError>;

    /// Get the name of the data source
    fn source_name(&self) -> &'static str;
}
