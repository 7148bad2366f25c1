//! Compiled structural markers for the result markup

use crate::config::SelectorSettings;
use crate::error::SelectorError;
use scraper::Selector;

/// CSS selectors locating result blocks, sponsor markers and fields
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub container: Selector,
    pub sponsored: Selector,
    pub title: Selector,
    pub price: Selector,
    pub image: Selector,
    pub image_attr: String,
}

impl SelectorSet {
    /// Compile the configured selector strings
    pub fn compile(settings: &SelectorSettings) -> Result<Self, SelectorError> {
        Ok(Self {
            container: parse("container", &settings.container)?,
            sponsored: parse("sponsored", &settings.sponsored)?,
            title: parse("title", &settings.title)?,
            price: parse("price", &settings.price)?,
            image: parse("image", &settings.image)?,
            image_attr: settings.image_attr.clone(),
        })
    }
}

fn parse(name: &'static str, selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        name,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
