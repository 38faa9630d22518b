//! Service layer
//!
//! Contains the feed pipeline separated from HTTP handlers.
//! Services orchestrate the X API client, generated posts, and the cache.

mod aggregator;
pub mod fallback;
mod fetcher;

pub use aggregator::FeedAggregator;
pub use fetcher::AccountFetcher;
