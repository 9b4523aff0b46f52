//! Dashboard and REST API endpoint handlers
//!
//! Provides handlers for:
//! - The HTML dashboard (`/`)
//! - JSON endpoints (`/api/v1/*`)

use crate::error::Result;
use crate::indices::{self, IndexEntry};
use crate::services::{
    DashboardService, DashboardView, HistoryResult, HistoryService, SentimentResult,
    SentimentService,
};
use crate::state::AppState;
use crate::web::render::{render_template, DashboardPage, ErrorPage};
use crate::web::types::*;
use axum::{
    extract::{Json, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::<Empty>::success_with_message("Market Pulse is running"))
}

// ============================================================================
// HTML Dashboard
// ============================================================================

/// Dashboard page - GET /?index={label}
///
/// Each request is a full render pass. Failures render an error page with
/// the matching status instead of the JSON envelope.
pub async fn dashboard_page(
    AxumState(state): AxumState<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    match DashboardService::render(&state, query.index.as_deref()).await {
        Ok(view) => render_template(&DashboardPage::from_view(&view)),
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!("Dashboard render failed: {}", e);
            } else {
                tracing::warn!("Dashboard request rejected: {}", e);
            }
            let page = ErrorPage {
                message: e.to_string(),
            };
            (status, render_template(&page)).into_response()
        }
    }
}

// ============================================================================
// REST API v1
// ============================================================================

/// Index list - GET /api/v1/indices
pub async fn get_indices() -> Json<ApiResponse<Vec<IndexEntry>>> {
    Json(ApiResponse::success_with_data(indices::all().to_vec()))
}

/// Full render pass as JSON - GET /api/v1/dashboard?index={label}
pub async fn get_dashboard(
    AxumState(state): AxumState<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<ApiResponse<DashboardView>>> {
    let view = DashboardService::render(&state, query.index.as_deref()).await?;
    Ok(Json(ApiResponse::success_with_data(view)))
}

/// Cached price history - GET /api/v1/history?index={label}
///
/// Missing data is not an error: `series` is `null`.
pub async fn get_history(
    AxumState(state): AxumState<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Result<Json<ApiResponse<HistoryResult>>> {
    let index = DashboardService::resolve_index(query.index.as_deref())?;
    let result = HistoryService::get_history(&state, index.label, index.symbol).await;
    Ok(Json(ApiResponse::success_with_data(result)))
}

/// Headline sentiment - GET /api/v1/sentiment
pub async fn get_sentiment(
    AxumState(state): AxumState<Arc<AppState>>,
) -> Result<Json<ApiResponse<SentimentResult>>> {
    let report = SentimentService::get_sentiment(&state).await?;
    Ok(Json(ApiResponse::success_with_data(report.into())))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ApiResponse<Empty>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
