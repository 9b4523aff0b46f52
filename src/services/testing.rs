//! In-memory provider fakes shared by service and route tests

use crate::config::DashboardConfig;
use crate::error::{AppError, Result};
use crate::providers::types::{Candle, HistoryWindow, NewsItem, ProviderHistory};
use crate::providers::{MarketDataProvider, NewsFeed};
use crate::sentiment::LexiconScorer;
use crate::state::AppState;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Hourly candles with the given closes
pub fn candles(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 6, 17, 3, 45, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: start + Duration::hours(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        })
        .collect()
}

pub struct FakeMarketData {
    closes: Vec<f64>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakeMarketData {
    pub fn with_closes(closes: &[f64]) -> Self {
        Self {
            closes: closes.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            closes: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarketData {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn get_history(&self, symbol: &str, _window: HistoryWindow) -> Result<ProviderHistory> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Upstream("provider unavailable".to_string()));
        }
        Ok(ProviderHistory {
            symbol: symbol.to_string(),
            timezone: chrono_tz::Asia::Kolkata,
            candles: candles(&self.closes),
        })
    }
}

pub struct FakeNewsFeed {
    titles: Vec<String>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakeNewsFeed {
    pub fn titles(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// `count` neutral headlines numbered from 0
    pub fn numbered(count: usize) -> Self {
        Self {
            titles: (0..count).map(|i| format!("Headline {}", i)).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            titles: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NewsFeed for FakeNewsFeed {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn fetch_items(&self) -> Result<Vec<NewsItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Feed("feed unavailable".to_string()));
        }
        Ok(self.titles.iter().map(NewsItem::titled).collect())
    }
}

pub fn test_state(market: Arc<FakeMarketData>, news: Arc<FakeNewsFeed>) -> AppState {
    AppState::with_sources(
        DashboardConfig::default(),
        market,
        news,
        Arc::new(LexiconScorer::new()),
    )
}
