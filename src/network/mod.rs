//! HTTP networking module
//!
//! Fetches search-results pages from the target site.

mod client;
mod user_agent;

pub use client::{build_search_url, HttpClient, PageFetcher};
pub use user_agent::DEFAULT_USER_AGENT;
