//! Application state shared across handlers

use crate::config::Settings;
use crate::lookup::PriceLookup;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Lookup service
    pub lookup: Arc<PriceLookup>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let lookup = PriceLookup::from_settings(settings)?;
        Ok(Self::with_lookup(lookup))
    }

    /// Create state around an already-built lookup service
    pub fn with_lookup(lookup: PriceLookup) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}
