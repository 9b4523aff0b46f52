//! Upstream data provider adapters
//!
//! - `MarketDataProvider` - price history (Yahoo Finance chart API)
//! - `NewsFeed` - headline feed (Google News RSS)

pub mod types;
pub mod yahoo;
pub mod google_news;

use crate::error::Result;
use async_trait::async_trait;
use types::*;

/// Source of OHLCV price history
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider ID (e.g., "yahoo")
    fn id(&self) -> &'static str;

    /// Fetch history for `symbol` over `window`.
    ///
    /// An upstream "no rows" answer is `Ok` with an empty candle list.
    async fn get_history(&self, symbol: &str, window: HistoryWindow) -> Result<ProviderHistory>;
}

/// Source of news headlines, in feed order
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Feed ID (e.g., "google_news")
    fn id(&self) -> &'static str;

    /// Fetch the current feed contents
    async fn fetch_items(&self) -> Result<Vec<NewsItem>>;
}

/// Shared HTTP client builder for provider adapters
pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent("Mozilla/5.0 (compatible; market-pulse/1.0)")
        .build()?;
    Ok(client)
}
