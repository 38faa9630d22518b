//! API layer
//!
//! HTTP handlers for:
//! - Feed JSON (aggregate and per-account)
//! - Landing page
//! - Metrics (Prometheus)

mod feed;
pub mod metrics;
mod page;

pub use feed::feed_router;
pub use metrics::metrics_router;
pub use page::{page_router, render_index};
