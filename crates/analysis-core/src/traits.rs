use crate::{AnalysisError, Bar, NewsItem, StockSnapshot};
use async_trait::async_trait;

/// Boundary to the external market-data collaborator.
///
/// The scoring core consumes already-fetched snapshots, bars and headlines;
/// implementations of this trait own all retrieval, retry and currency
/// conversion policy.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn snapshot(&self, ticker: &str, exchange: &str) -> Result<StockSnapshot, AnalysisError>;

    async fn history(
        &self,
        ticker: &str,
        exchange: &str,
        days: u32,
    ) -> Result<Vec<Bar>, AnalysisError>;

    async fn news(&self, ticker: &str) -> Result<Vec<NewsItem>, AnalysisError>;
}
