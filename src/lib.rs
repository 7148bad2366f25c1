//! price-lookup: first-product price lookups for shopping search pages
//!
//! Fetches a search-results page, skips sponsored placements and returns the
//! first product that carries a title, a price and a thumbnail.

pub mod config;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod network;
pub mod web;

pub use config::Settings;
pub use error::{FetchError, LookupError, SelectorError};
pub use extract::{Extractor, ProductSummary, SelectorSet};
pub use lookup::PriceLookup;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for the outbound search request in seconds
pub const DEFAULT_TIMEOUT: f64 = 10.0;
