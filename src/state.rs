//! Application state management

use crate::cache::TtlCache;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::providers::google_news::GoogleNewsFeed;
use crate::providers::yahoo::YahooProvider;
use crate::providers::{MarketDataProvider, NewsFeed};
use crate::sentiment::{LexiconScorer, PolarityScorer};
use crate::services::PriceSeries;
use std::sync::Arc;

/// Application state shared across all requests
pub struct AppState {
    pub config: DashboardConfig,

    /// Price history provider
    pub market_data: Arc<dyn MarketDataProvider>,

    /// Headline feed
    pub news: Arc<dyn NewsFeed>,

    /// Headline polarity model
    pub scorer: Arc<dyn PolarityScorer>,

    /// Price history per symbol; `None` records a "no data" answer
    pub price_cache: TtlCache<Option<PriceSeries>>,
}

impl AppState {
    /// Create state wired to the live upstream services
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let market_data = Arc::new(YahooProvider::new(
            &config.market_data_url,
            config.http_timeout(),
        )?);
        let news = Arc::new(GoogleNewsFeed::new(&config.feed_url, config.http_timeout())?);

        tracing::info!(
            "Market data: {} | News feed: {} | Cache TTL: {}s",
            market_data.id(),
            news.id(),
            config.cache_ttl_secs
        );

        Ok(Self::with_sources(
            config,
            market_data,
            news,
            Arc::new(LexiconScorer::new()),
        ))
    }

    /// Create state from explicit sources
    pub fn with_sources(
        config: DashboardConfig,
        market_data: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsFeed>,
        scorer: Arc<dyn PolarityScorer>,
    ) -> Self {
        let price_cache = TtlCache::new(config.cache_ttl());
        Self {
            config,
            market_data,
            news,
            scorer,
            price_cache,
        }
    }
}
