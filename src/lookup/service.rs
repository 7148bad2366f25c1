//! Stateless fetch-then-extract service

use crate::config::Settings;
use crate::error::LookupError;
use crate::extract::{Extractor, ProductSummary};
use crate::network::{HttpClient, PageFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Looks up the first usable product for a search query
#[derive(Clone)]
pub struct PriceLookup {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<Extractor>,
    dump_html: Option<PathBuf>,
}

impl PriceLookup {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Extractor) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
            dump_html: None,
        }
    }

    /// Build the HTTP client and extractor described by `settings`
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing, settings.site.search_url.clone())?;
        let extractor = Extractor::from_settings(&settings.site)?;

        let mut lookup = Self::new(Arc::new(client), extractor);
        lookup.dump_html = settings.debug.dump_html.clone();
        Ok(lookup)
    }

    /// Write each fetched page to `path` before extraction
    pub fn with_html_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_html = Some(path.into());
        self
    }

    /// Fetch the results page for `query` and extract its first product
    pub async fn lookup(&self, query: &str) -> Result<ProductSummary, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::MissingQuery);
        }

        let start = Instant::now();
        info!("Looking up '{}'", query);

        let body = match self.fetcher.fetch(query).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Fetch for '{}' failed: {}", query, e);
                return Err(e.into());
            }
        };
        debug!("Fetched {} bytes in {:?}", body.len(), start.elapsed());

        if let Some(ref path) = self.dump_html {
            if let Err(e) = tokio::fs::write(path, &body).await {
                warn!("Could not dump page to {}: {}", path.display(), e);
            }
        }

        // Parsing is CPU-bound and scraper's document is not Send
        let extractor = self.extractor.clone();
        let found = tokio::task::spawn_blocking(move || extractor.extract(&body))
            .await
            .map_err(|e| LookupError::Unexpected(format!("extraction task failed: {}", e)))?;

        match found {
            Some(product) => {
                info!(
                    "Found '{}' at {} for '{}' in {:?}",
                    product.title,
                    product.price,
                    query,
                    start.elapsed()
                );
                Ok(product)
            }
            None => {
                warn!("No non-sponsored product found for '{}'", query);
                Err(LookupError::NoMatchFound)
            }
        }
    }
}
