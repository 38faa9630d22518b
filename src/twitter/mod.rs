//! X (Twitter) API module
//!
//! Handles:
//! - User lookup by handle
//! - Recent post retrieval with media expansion
//! - Normalization into feed posts

mod client;
mod error;
mod types;

pub use client::{TwitterClient, UserContext, normalize_timeline};
pub use error::{Result, TwitterError};
pub use types::{
    ApiProblem, Attachments, Includes, Media, TimelineResponse, Tweet, User, UserLookupResponse,
};
