//! Yahoo Finance chart API adapter

use crate::error::{AppError, Result};
use crate::providers::types::*;
use crate::providers::MarketDataProvider;
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Yahoo Finance market-data provider
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, window: HistoryWindow) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url,
            urlencoding::encode(symbol),
            window.range,
            window.interval
        )
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    async fn get_history(&self, symbol: &str, window: HistoryWindow) -> Result<ProviderHistory> {
        let url = self.chart_url(symbol, window);
        debug!("Fetching chart: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Yahoo reports unknown symbols as 404 with a chart.error body
        match parse_chart(symbol, &body) {
            Ok(history) => {
                info!("Fetched {} candles for {}", history.candles.len(), symbol);
                Ok(history)
            }
            Err(e) if !status.is_success() => Err(AppError::Upstream(format!(
                "Chart request for {} failed with {}: {}",
                symbol, status, e
            ))),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Response decoding
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

/// Decode a chart API body into typed candles.
///
/// Rows missing any price column are dropped; a missing volume becomes 0.
pub(crate) fn parse_chart(requested_symbol: &str, body: &str) -> Result<ProviderHistory> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        return Err(AppError::Upstream(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::Upstream("No chart result in response".to_string()))?;

    let timezone = result
        .meta
        .exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC);

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let candles = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(Candle {
                timestamp,
                open: at(&quote.open, i)?,
                high: at(&quote.high, i)?,
                low: at(&quote.low, i)?,
                close: at(&quote.close, i)?,
                volume: at(&quote.volume, i).unwrap_or(0.0) as i64,
            })
        })
        .collect();

    Ok(ProviderHistory {
        symbol: result
            .meta
            .symbol
            .unwrap_or_else(|| requested_symbol.to_string()),
        timezone,
        candles,
    })
}
