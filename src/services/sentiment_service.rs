//! Sentiment Service
//!
//! Scores the news feed. The feed is fetched once per call and is never
//! cached; the scored sample and the displayed headlines come from that same
//! fetch.

use crate::error::Result;
use crate::providers::types::NewsItem;
use crate::pulse::PulseReading;
use crate::sentiment::{PolarityScorer, SentimentTally};
use crate::state::AppState;
use serde::Serialize;
use tracing::info;

/// Number of feed entries that are scored
pub const SCORED_HEADLINES: usize = 15;

/// Number of feed entries shown to the user
pub const DISPLAY_HEADLINES: usize = 5;

/// Scoring outcome for one feed fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub tally: SentimentTally,
    /// First headlines in feed order, unscored
    pub headlines: Vec<String>,
}

impl SentimentReport {
    pub fn pulse(&self) -> PulseReading {
        PulseReading::from_tally(&self.tally)
    }
}

/// Sentiment result for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SentimentResult {
    pub tally: SentimentTally,
    pub pulse: PulseReading,
    pub headlines: Vec<String>,
}

impl From<SentimentReport> for SentimentResult {
    fn from(report: SentimentReport) -> Self {
        Self {
            pulse: report.pulse(),
            tally: report.tally,
            headlines: report.headlines,
        }
    }
}

/// Sentiment service for business logic
pub struct SentimentService;

impl SentimentService {
    /// Fetch the feed and score it. Feed failures propagate.
    pub async fn get_sentiment(state: &AppState) -> Result<SentimentReport> {
        let items = state.news.fetch_items().await?;
        let report = Self::score_items(&items, state.scorer.as_ref());

        info!(
            "SentimentService::get_sentiment - {} items from {}, +{} -{} ={}",
            items.len(),
            state.news.id(),
            report.tally.positive,
            report.tally.negative,
            report.tally.neutral
        );

        Ok(report)
    }

    /// Score the first 15 items and keep the first 5 titles for display
    pub fn score_items(items: &[NewsItem], scorer: &dyn PolarityScorer) -> SentimentReport {
        let tally = SentimentTally::from_titles(
            items.iter().take(SCORED_HEADLINES).map(|i| i.title.as_str()),
            scorer,
        );

        let headlines = items
            .iter()
            .take(DISPLAY_HEADLINES)
            .map(|i| i.title.clone())
            .collect();

        SentimentReport { tally, headlines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::sentiment::LexiconScorer;
    use crate::services::testing::{test_state, FakeMarketData, FakeNewsFeed};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn items(titles: &[&str]) -> Vec<NewsItem> {
        titles.iter().map(|t| NewsItem::titled(*t)).collect()
    }

    #[test]
    fn test_sample_capped_at_fifteen() {
        let titles: Vec<String> = (0..40).map(|i| format!("Headline {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let report = SentimentService::score_items(&items(&refs), &LexiconScorer::new());

        assert_eq!(report.tally.total(), 15);
        assert_eq!(report.headlines.len(), 5);
    }

    #[test]
    fn test_short_feed_counts_everything() {
        let report = SentimentService::score_items(
            &items(&["Nifty gains", "Sensex falls", "Budget on Monday"]),
            &LexiconScorer::new(),
        );

        assert_eq!(report.tally, SentimentTally::new(1, 1, 1));
        assert_eq!(report.headlines.len(), 3);
    }

    #[test]
    fn test_empty_feed() {
        let report = SentimentService::score_items(&[], &LexiconScorer::new());
        assert_eq!(report.tally.total(), 0);
        assert!(report.headlines.is_empty());
        assert_eq!(report.pulse().pulse, 0.0);
    }

    #[test]
    fn test_headlines_are_feed_prefix() {
        let titles = ["a", "b", "c", "d", "e", "f", "g"];
        let report = SentimentService::score_items(&items(&titles), &LexiconScorer::new());
        assert_eq!(report.headlines, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_single_fetch_per_call() {
        let news = Arc::new(FakeNewsFeed::numbered(20));
        let state = test_state(Arc::new(FakeMarketData::with_closes(&[])), news.clone());

        let report = SentimentService::get_sentiment(&state).await.unwrap();

        assert_eq!(news.calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.headlines[0], "Headline 0");
        assert_eq!(report.tally.total(), 15);

        // No caching: a second call fetches again
        SentimentService::get_sentiment(&state).await.unwrap();
        assert_eq!(news.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feed_failure_propagates() {
        let state = test_state(
            Arc::new(FakeMarketData::with_closes(&[])),
            Arc::new(FakeNewsFeed::failing()),
        );

        let err = SentimentService::get_sentiment(&state).await.unwrap_err();
        assert!(matches!(err, AppError::Feed(_)));
    }
}
