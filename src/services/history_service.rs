//! History Service
//!
//! Fetches index price history through the market-data provider, derives
//! per-point percent change and memoizes results per symbol for the cache TTL.

use crate::providers::types::{Candle, HistoryWindow, ProviderHistory};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

/// One hourly bar with its change against the previous close
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    /// `None` for the first point, or when the previous close is zero
    pub change_pct: Option<f64>,
}

/// Ordered price history for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: String,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
    pub points: Vec<PricePoint>,
}

fn serialize_tz<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

impl PriceSeries {
    pub fn from_history(history: ProviderHistory) -> Self {
        Self {
            symbol: history.symbol,
            timezone: history.timezone,
            points: with_changes(&history.candles),
        }
    }

    /// Percent change of the most recent point
    pub fn latest_change_pct(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.change_pct)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `(close[i] - close[i-1]) / close[i-1] * 100`, absent for the first point
pub fn percent_change(previous_close: f64, close: f64) -> Option<f64> {
    if previous_close == 0.0 {
        return None;
    }
    Some((close - previous_close) / previous_close * 100.0)
}

/// Attach percent change to each candle
pub fn with_changes(candles: &[Candle]) -> Vec<PricePoint> {
    let mut previous_close: Option<f64> = None;
    candles
        .iter()
        .map(|c| {
            let change_pct = previous_close.and_then(|prev| percent_change(prev, c.close));
            previous_close = Some(c.close);
            PricePoint {
                timestamp: c.timestamp,
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
                volume: c.volume,
                change_pct,
            }
        })
        .collect()
}

/// History result for API responses
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResult {
    pub label: String,
    pub symbol: String,
    pub window: HistoryWindow,
    /// `None` when the provider had no data or failed
    pub series: Option<PriceSeries>,
}

/// History service for business logic
pub struct HistoryService;

impl HistoryService {
    /// Price series for `symbol` over the last five days at hourly resolution.
    ///
    /// Any provider error or empty answer yields `None`. Empty answers are
    /// cached like data; errors are not, so the next call retries.
    pub async fn get_index_data(state: &AppState, symbol: &str) -> Option<PriceSeries> {
        if let Some(cached) = state.price_cache.get(symbol) {
            debug!("Price cache hit for {}", symbol);
            return cached;
        }

        info!("HistoryService::get_index_data - {} (cache miss)", symbol);

        match state
            .market_data
            .get_history(symbol, HistoryWindow::FIVE_DAYS_HOURLY)
            .await
        {
            Ok(history) if history.candles.is_empty() => {
                warn!("No price rows returned for {}", symbol);
                state.price_cache.insert(symbol, None);
                None
            }
            Ok(history) => {
                let series = PriceSeries::from_history(history);
                state.price_cache.insert(symbol, Some(series.clone()));
                Some(series)
            }
            Err(e) => {
                warn!(
                    "Price fetch from {} failed for {}: {}",
                    state.market_data.id(),
                    symbol,
                    e
                );
                None
            }
        }
    }

    /// History lookup packaged for the JSON API
    pub async fn get_history(state: &AppState, label: &str, symbol: &str) -> HistoryResult {
        HistoryResult {
            label: label.to_string(),
            symbol: symbol.to_string(),
            window: HistoryWindow::FIVE_DAYS_HOURLY,
            series: Self::get_index_data(state, symbol).await,
        }
    }
}
