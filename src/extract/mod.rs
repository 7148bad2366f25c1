//! Product extraction from search-results pages
//!
//! Walks result blocks in document order, drops sponsored placements and
//! returns the first block that yields a title, a price and an image.

mod product;
mod selectors;

pub use product::ProductSummary;
pub use selectors::SelectorSet;

use crate::config::SiteSettings;
use crate::error::SelectorError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Turns a results page into at most one `ProductSummary`
#[derive(Debug, Clone)]
pub struct Extractor {
    /// Result, sponsor and field markers
    selectors: SelectorSet,
    /// Prepended to the scraped price text
    currency_symbol: String,
    /// Relative image sources are resolved against this
    base_url: Option<Url>,
}

impl Extractor {
    pub fn new(selectors: SelectorSet, currency_symbol: impl Into<String>) -> Self {
        Self {
            selectors,
            currency_symbol: currency_symbol.into(),
            base_url: None,
        }
    }

    /// Build an extractor from site settings
    ///
    /// The base URL is the search URL with the query placeholder cut off.
    pub fn from_settings(site: &SiteSettings) -> Result<Self, SelectorError> {
        let selectors = SelectorSet::compile(&site.selectors)?;
        let base = site.search_url.split("{query}").next().unwrap_or_default();
        let mut extractor = Self::new(selectors, site.currency_symbol.clone());
        extractor.base_url = Url::parse(base).ok();
        Ok(extractor)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Extract the first non-sponsored, complete product from `html`
    pub fn extract(&self, html: &str) -> Option<ProductSummary> {
        let document = Html::parse_document(html);

        document
            .select(&self.selectors.container)
            .filter(|container| !self.is_sponsored(container))
            .find_map(|container| self.read_product(&container))
    }

    /// Sponsored when the marker is on the block itself or anywhere inside it
    fn is_sponsored(&self, container: &ElementRef) -> bool {
        self.selectors.sponsored.matches(container)
            || container.select(&self.selectors.sponsored).next().is_some()
    }

    fn read_product(&self, container: &ElementRef) -> Option<ProductSummary> {
        let title = first_text(container, &self.selectors.title)?;
        let price = first_text(container, &self.selectors.price)?;
        let image_url = self.image_url(container)?;

        Some(ProductSummary {
            title,
            price: format!("{}{}", self.currency_symbol, price),
            image_url,
        })
    }

    fn image_url(&self, container: &ElementRef) -> Option<String> {
        let src = container
            .select(&self.selectors.image)
            .next()?
            .value()
            .attr(&self.selectors.image_attr)?
            .trim();

        if src.is_empty() {
            return None;
        }

        match Url::parse(src) {
            Ok(_) => Some(src.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_ref()?;
                base.join(src).ok().map(|u| u.to_string())
            }
            Err(_) => None,
        }
    }
}

/// Trimmed text of the first match, if non-empty
fn first_text(container: &ElementRef, selector: &Selector) -> Option<String> {
    let text = container
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    (!text.is_empty()).then_some(text)
}
