//! Dashboard HTTP surface
//!
//! Serves the HTML dashboard and a read-only JSON API over the same
//! render pass.

pub mod handlers;
pub mod rate_limiter;
pub mod render;
mod server;
mod types;

pub use server::{build_router, DashboardServer};
pub use types::{ApiResponse, Empty, IndexQuery};
