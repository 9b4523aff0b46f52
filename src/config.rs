//! Dashboard configuration
//!
//! Defaults match the hosted dashboard. Any value can be overridden with a
//! `MARKET_PULSE_*` environment variable.

use crate::error::{AppError, Result};
use std::str::FromStr;
use std::time::Duration;

/// Google News RSS search for Indian market headlines
pub const DEFAULT_FEED_URL: &str =
    "https://news.google.com/rss/search?q=nifty+market&hl=en-IN&gl=IN&ceid=IN:en";

/// Yahoo Finance chart API host
pub const DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com";

const ENV_PREFIX: &str = "MARKET_PULSE_";

/// Runtime configuration for the dashboard server and its upstream clients
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// Time-to-live for cached price history
    pub cache_ttl_secs: u64,
    /// Timeout applied to every upstream HTTP request
    pub http_timeout_secs: u64,
    pub feed_url: String,
    pub market_data_url: String,
    /// Requests per second for general routes
    pub api_rate_limit: u32,
    /// Requests per second for routes that fetch the news feed
    pub feed_rate_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            cache_ttl_secs: 600,
            http_timeout_secs: 30,
            feed_url: DEFAULT_FEED_URL.to_string(),
            market_data_url: DEFAULT_MARKET_DATA_URL.to_string(),
            api_rate_limit: 100,
            feed_rate_limit: 5,
        }
    }
}

impl DashboardConfig {
    /// Build configuration from defaults plus process environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults plus overrides resolved by `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_value("PORT", &port)?;
        }
        if let Some(ttl) = get("CACHE_TTL_SECS") {
            config.cache_ttl_secs = parse_value("CACHE_TTL_SECS", &ttl)?;
        }
        if let Some(timeout) = get("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_value("HTTP_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(feed_url) = get("FEED_URL") {
            url::Url::parse(&feed_url)
                .map_err(|e| AppError::Config(format!("Invalid FEED_URL '{}': {}", feed_url, e)))?;
            config.feed_url = feed_url;
        }
        if let Some(market_data_url) = get("MARKET_DATA_URL") {
            url::Url::parse(&market_data_url).map_err(|e| {
                AppError::Config(format!("Invalid MARKET_DATA_URL '{}': {}", market_data_url, e))
            })?;
            config.market_data_url = market_data_url.trim_end_matches('/').to_string();
        }
        if let Some(rate) = get("API_RATE_LIMIT") {
            config.api_rate_limit = parse_value("API_RATE_LIMIT", &rate)?;
        }
        if let Some(rate) = get("FEED_RATE_LIMIT") {
            config.feed_rate_limit = parse_value("FEED_RATE_LIMIT", &rate)?;
        }

        if config.api_rate_limit == 0 || config.feed_rate_limit == 0 {
            return Err(AppError::Config("Rate limits must be at least 1/s".to_string()));
        }

        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}{} '{}': {}", ENV_PREFIX, name, raw, e)))
}
