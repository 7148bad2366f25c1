//! Error types shared by the fetcher, extractor and lookup service

use thiserror::Error;

/// Failure to obtain a search-results page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The search URL template produced something that is not a URL
    #[error("invalid search url: {0}")]
    InvalidUrl(String),
    /// Upstream answered with anything other than 200
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// A configured CSS selector that failed to compile
#[derive(Debug, Error)]
#[error("invalid {name} selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub name: &'static str,
    pub selector: String,
    pub reason: String,
}

/// Outcome of a failed price lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("query parameter is missing")]
    MissingQuery,
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchError),
    #[error("no non-sponsored product with title, price and image was found")]
    NoMatchFound,
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
