//! Common provider types

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Requested history window, expressed in provider range/interval codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryWindow {
    pub range: &'static str,
    pub interval: &'static str,
}

impl HistoryWindow {
    /// Last five trading days at hourly resolution
    pub const FIVE_DAYS_HOURLY: HistoryWindow = HistoryWindow {
        range: "5d",
        interval: "1h",
    };
}

/// One OHLCV row as delivered by a market-data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Provider response for a history request
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderHistory {
    pub symbol: String,
    /// Exchange time zone, used for display only
    pub timezone: Tz,
    pub candles: Vec<Candle>,
}

/// One entry of a news feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub source: Option<String>,
}

impl NewsItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            published: None,
            source: None,
        }
    }
}
