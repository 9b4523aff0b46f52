//! HTTP server for the dashboard and REST API
//!
//! Provides:
//! - HTML dashboard (`/`)
//! - JSON API (`/api/v1/*`)
//! - Rate limiting to protect the upstream feed and market-data provider

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::web::handlers;
use crate::web::rate_limiter::{rate_limit_middleware, RateLimiterState};
use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all routes, state and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    let rate_limiter = Arc::new(RateLimiterState::new(
        state.config.api_rate_limit,
        state.config.feed_rate_limit,
    ));

    // Read-only API, any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ================================================================
        // Dashboard
        // ================================================================
        .route("/", get(handlers::dashboard_page))
        .route("/health", get(handlers::health_check))

        // ================================================================
        // REST API v1
        // ================================================================
        .route("/api/v1/indices", get(handlers::get_indices))
        .route("/api/v1/dashboard", get(handlers::get_dashboard))
        .route("/api/v1/history", get(handlers::get_history))
        .route("/api/v1/sentiment", get(handlers::get_sentiment))
        .fallback(handlers::not_found)

        // ================================================================
        // Add state and middleware
        // ================================================================
        .with_state(state)
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Dashboard server manager
pub struct DashboardServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl DashboardServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
        }
    }

    /// Bind and start serving in the background. Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        let bind_address = self.state.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&bind_address)
            .await
            .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", bind_address, e)))?;
        let local_addr = listener.local_addr()?;

        let app = build_router(self.state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Dashboard server shutting down");
            });

            if let Err(e) = server.await {
                error!("Dashboard server error: {}", e);
            }
        });

        self.shutdown_tx = Some(shutdown_tx);

        info!("Market Pulse dashboard started on {}", local_addr);
        info!("");
        info!("=== Endpoints ===");
        info!("  GET  http://{}/", local_addr);
        info!("  GET  http://{}/?index=SENSEX", local_addr);
        info!("  GET  http://{}/health", local_addr);
        info!("  GET  http://{}/api/v1/indices", local_addr);
        info!("  GET  http://{}/api/v1/dashboard?index=NIFTY%2050", local_addr);
        info!("  GET  http://{}/api/v1/history?index=BANK%20NIFTY", local_addr);
        info!("  GET  http://{}/api/v1/sentiment", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("Dashboard server stop signal sent");
        }
    }
}

impl Drop for DashboardServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::sentiment::LexiconScorer;
    use crate::services::testing::{test_state, FakeMarketData, FakeNewsFeed};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(market: FakeMarketData, news: FakeNewsFeed) -> Router {
        build_router(Arc::new(test_state(Arc::new(market), Arc::new(news))))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(
            app(FakeMarketData::with_closes(&[]), FakeNewsFeed::numbered(0)),
            "/health",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Market Pulse is running");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (status, body) = get(
            app(
                FakeMarketData::with_closes(&[100.0, 101.0]),
                FakeNewsFeed::titles(&["Nifty gains"]),
            ),
            "/?index=BANK%20NIFTY",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("BANK NIFTY &ndash; Last 5 Days"));
        assert!(body.contains("1.00%"));
        assert!(body.contains("<li>Nifty gains</li>"));
    }

    #[tokio::test]
    async fn test_dashboard_page_without_price_data() {
        let (status, body) = get(
            app(FakeMarketData::failing(), FakeNewsFeed::numbered(2)),
            "/",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Unable to fetch market data."));
        assert!(!body.contains("<svg"));
    }

    #[tokio::test]
    async fn test_dashboard_page_feed_failure() {
        let (status, body) = get(
            app(FakeMarketData::with_closes(&[1.0]), FakeNewsFeed::failing()),
            "/",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("feed unavailable"));
    }

    #[tokio::test]
    async fn test_unknown_index_rejected() {
        let (status, body) = get(
            app(FakeMarketData::with_closes(&[1.0]), FakeNewsFeed::numbered(1)),
            "/api/v1/dashboard?index=DOW",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["data"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let (status, body) = get(
            app(
                FakeMarketData::with_closes(&[200.0, 202.0]),
                FakeNewsFeed::titles(&["Sensex falls", "Nifty gains", "Budget on Monday"]),
            ),
            "/api/v1/dashboard?index=SENSEX",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let data = &json["data"];
        assert_eq!(data["selected"]["symbol"], "^BSESN");
        assert_eq!(data["tally"]["positive"], 1);
        assert_eq!(data["tally"]["negative"], 1);
        assert_eq!(data["tally"]["neutral"], 1);
        assert_eq!(data["series"]["timezone"], "Asia/Kolkata");
        assert!(data["series"]["points"][0]["change_pct"].is_null());
        assert_eq!(data["headlines"][0], "Sensex falls");
    }

    #[tokio::test]
    async fn test_history_json_no_data() {
        let (status, body) = get(
            app(FakeMarketData::with_closes(&[]), FakeNewsFeed::numbered(0)),
            "/api/v1/history",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["symbol"], "^NSEI");
        assert!(json["data"]["series"].is_null());
    }

    #[tokio::test]
    async fn test_sentiment_json() {
        let (status, body) = get(
            app(FakeMarketData::with_closes(&[]), FakeNewsFeed::numbered(20)),
            "/api/v1/sentiment",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["tally"]["neutral"], 15);
        assert_eq!(json["data"]["pulse"]["pulse"], 0.0);
        assert_eq!(json["data"]["pulse"]["display"], 0.5);
        assert_eq!(json["data"]["headlines"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_feed_routes_rate_limited() {
        let config = DashboardConfig {
            feed_rate_limit: 1,
            ..DashboardConfig::default()
        };
        let state = AppState::with_sources(
            config,
            Arc::new(FakeMarketData::with_closes(&[])),
            Arc::new(FakeNewsFeed::numbered(1)),
            Arc::new(LexiconScorer::new()),
        );
        let app = build_router(Arc::new(state));

        let (first, _) = get(app.clone(), "/api/v1/sentiment").await;
        let (second, _) = get(app.clone(), "/api/v1/sentiment").await;
        let (health, _) = get(app, "/health").await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(health, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_feed_cap_shared_across_clients() {
        let config = DashboardConfig {
            feed_rate_limit: 1,
            ..DashboardConfig::default()
        };
        let state = AppState::with_sources(
            config,
            Arc::new(FakeMarketData::with_closes(&[])),
            Arc::new(FakeNewsFeed::numbered(1)),
            Arc::new(LexiconScorer::new()),
        );
        let app = build_router(Arc::new(state));

        let request = |client: &str| {
            Request::builder()
                .uri("/")
                .header("x-forwarded-for", client)
                .body(Body::empty())
                .unwrap()
        };

        let first = app.clone().oneshot(request("10.0.0.1")).await.unwrap();
        let second = app.oneshot(request("10.0.0.2")).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(second.headers()["x-ratelimit-type"], "feed");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get(
            app(FakeMarketData::with_closes(&[]), FakeNewsFeed::numbered(0)),
            "/api/v1/placeorder",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_start_stop() {
        let config = DashboardConfig {
            port: 0,
            ..DashboardConfig::default()
        };
        let state = AppState::with_sources(
            config,
            Arc::new(FakeMarketData::with_closes(&[])),
            Arc::new(FakeNewsFeed::numbered(0)),
            Arc::new(LexiconScorer::new()),
        );
        let mut server = DashboardServer::new(Arc::new(state));

        let addr = server.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert!(server.shutdown_tx.is_some());

        server.stop();
        assert!(server.shutdown_tx.is_none());
        // Second stop is a no-op
        server.stop();
    }
}
