//! Data layer module
//!
//! Handles the in-memory state of the feed:
//! - Normalized post model
//! - Aggregate cache (volatile)

mod cache;
mod models;

pub use cache::FeedCache;
pub use models::*;
