//! Server-side HTML presenter
//!
//! Projects a `DashboardView` into the askama page templates: index
//! selector, price chart (or a warning), latest change metric, pulse bar,
//! counts, headlines.

use crate::indices::IndexEntry;
use crate::sentiment::SentimentTally;
use crate::services::{DashboardView, PricePoint, PriceSeries};
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 280.0;
const CHART_PAD: f64 = 44.0;

/// Helper to render templates into axum responses
pub fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    }
}

/// Latest change metric text
pub fn format_change(change_pct: Option<f64>) -> String {
    match change_pct {
        Some(change) => format!("{:.2}%", change),
        None => "n/a".to_string(),
    }
}

/// One entry of the index selector
pub struct SelectorOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Chart marker for a single-point series
pub struct ChartPoint {
    pub x: String,
    pub y: String,
}

/// Coordinates and labels for the inline SVG price chart
pub struct PriceChart {
    pub symbol: String,
    pub width: f64,
    pub height: f64,
    /// Polyline `x,y` pairs
    pub points: String,
    /// Set instead of a line when there is only one point
    pub marker: Option<ChartPoint>,
    pub first_label: String,
    pub last_label: String,
    pub max_label: String,
    pub min_label: String,
    pub left_x: String,
    pub right_x: String,
    pub axis_y: String,
    pub max_y: String,
    pub min_y: String,
}

/// Line chart of closing prices, time labels in the exchange time zone
pub fn price_chart(series: &PriceSeries) -> PriceChart {
    let closes: Vec<f64> = series.points.iter().map(|p| p.close).collect();
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let inner_w = CHART_WIDTH - 2.0 * CHART_PAD;
    let inner_h = CHART_HEIGHT - 2.0 * CHART_PAD;
    let step = if closes.len() > 1 {
        inner_w / (closes.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let x = if closes.len() > 1 {
                CHART_PAD + i as f64 * step
            } else {
                CHART_WIDTH / 2.0
            };
            let y = CHART_PAD + (max - close) / span * inner_h;
            (x, y)
        })
        .collect();

    let marker = match coords.as_slice() {
        [(x, y)] => Some(ChartPoint {
            x: format!("{:.1}", x),
            y: format!("{:.1}", y),
        }),
        _ => None,
    };
    let points = coords
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let time_label = |p: Option<&PricePoint>| {
        p.map(|p| {
            p.timestamp
                .with_timezone(&series.timezone)
                .format("%d %b %H:%M")
                .to_string()
        })
        .unwrap_or_default()
    };
    let (max_label, min_label) = if closes.is_empty() {
        (String::new(), String::new())
    } else {
        (format!("{:.2}", max), format!("{:.2}", min))
    };

    PriceChart {
        symbol: series.symbol.clone(),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        points,
        marker,
        first_label: time_label(series.points.first()),
        last_label: time_label(series.points.last()),
        max_label,
        min_label,
        left_x: format!("{:.1}", CHART_PAD),
        right_x: format!("{:.1}", CHART_WIDTH - CHART_PAD),
        axis_y: format!("{:.1}", CHART_HEIGHT - CHART_PAD / 3.0),
        max_y: format!("{:.1}", CHART_PAD - 6.0),
        min_y: format!("{:.1}", CHART_HEIGHT - CHART_PAD + 14.0),
    }
}

/// Chart and metric, present only when there is price data
pub struct PriceSection {
    pub label: &'static str,
    pub chart: PriceChart,
    pub change: String,
}

/// GET / - Dashboard page
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub options: Vec<SelectorOption>,
    pub price: Option<PriceSection>,
    pub pulse_value: String,
    pub pulse_percent: String,
    pub tally: SentimentTally,
    pub headlines: Vec<String>,
    pub rendered_at: String,
}

impl DashboardPage {
    pub fn from_view(view: &DashboardView) -> Self {
        let options = view
            .indices
            .iter()
            .map(|entry: &IndexEntry| SelectorOption {
                label: entry.label,
                selected: entry.label == view.selected.label,
            })
            .collect();

        let price = view
            .series
            .as_ref()
            .filter(|series| !series.is_empty())
            .map(|series| PriceSection {
                label: view.selected.label,
                chart: price_chart(series),
                change: format_change(view.latest_change_pct),
            });

        Self {
            options,
            price,
            pulse_value: format!("{:.3}", view.pulse.display),
            pulse_percent: format!("{:.0}", view.pulse.display * 100.0),
            tally: view.tally,
            headlines: view.headlines.clone(),
            rendered_at: view
                .rendered_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        }
    }
}

/// Page shown when a render pass fails
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
}
