//! Dashboard Service
//!
//! One render pass: resolve the selected index, fetch its price history,
//! score the news feed and derive the pulse. Steps run strictly in sequence.

use crate::error::{AppError, Result};
use crate::indices::{self, IndexEntry};
use crate::pulse::PulseReading;
use crate::sentiment::SentimentTally;
use crate::services::history_service::{HistoryService, PriceSeries};
use crate::services::sentiment_service::SentimentService;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Everything the presenter needs for one page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub indices: Vec<IndexEntry>,
    pub selected: IndexEntry,
    /// `None` means "no data": show a warning instead of chart and metric
    pub series: Option<PriceSeries>,
    pub latest_change_pct: Option<f64>,
    pub tally: SentimentTally,
    pub pulse: PulseReading,
    pub headlines: Vec<String>,
    pub rendered_at: DateTime<Utc>,
}

/// Dashboard service for business logic
pub struct DashboardService;

impl DashboardService {
    /// Resolve a user-supplied label; no label selects the default index
    pub fn resolve_index(label: Option<&str>) -> Result<IndexEntry> {
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            None => Ok(indices::default_entry()),
            Some(label) => indices::find_by_label(label)
                .ok_or_else(|| AppError::Validation(format!("Unknown index '{}'", label))),
        }
    }

    /// Run a full render pass for the selected index
    pub async fn render(state: &AppState, selected: Option<&str>) -> Result<DashboardView> {
        let index = Self::resolve_index(selected)?;
        info!("DashboardService::render - {} ({})", index.label, index.symbol);

        let series = HistoryService::get_index_data(state, index.symbol).await;
        let sentiment = SentimentService::get_sentiment(state).await?;
        let pulse = sentiment.pulse();

        Ok(DashboardView {
            indices: indices::all().to_vec(),
            selected: index,
            latest_change_pct: series.as_ref().and_then(PriceSeries::latest_change_pct),
            series,
            tally: sentiment.tally,
            pulse,
            headlines: sentiment.headlines,
            rendered_at: Utc::now(),
        })
    }
}
