//! Services Layer
//!
//! Business logic shared between the HTML dashboard and the JSON API.
//!
//! # Architecture
//!
//! ```text
//! Browser      --> GET /            ──┐
//!                                     ├──> Services --> Providers / cache
//! API client   --> GET /api/v1/*    ──┘
//! ```
//!
//! # Services
//!
//! - `HistoryService` - Index price history with TTL caching
//! - `SentimentService` - News feed scoring
//! - `DashboardService` - One full render pass

pub mod history_service;
pub mod sentiment_service;
pub mod dashboard_service;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types and services
pub use history_service::{HistoryService, HistoryResult, PricePoint, PriceSeries};
pub use sentiment_service::{SentimentService, SentimentReport, SentimentResult};
pub use dashboard_service::{DashboardService, DashboardView};
