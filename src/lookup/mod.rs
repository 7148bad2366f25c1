//! Price lookup orchestration
//!
//! Composes the fetcher and the extractor into one request/response cycle.

mod service;

pub use service::PriceLookup;
