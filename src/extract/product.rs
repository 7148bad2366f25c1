//! The extracted product record

use serde::{Deserialize, Serialize};

/// First usable product on a results page
///
/// Only ever built with all three fields populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub title: String,
    /// Currency-prefixed price text, e.g. `¥1,980`
    pub price: String,
    /// Absolute thumbnail URL
    pub image_url: String,
}

impl ProductSummary {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            image_url: image_url.into(),
        }
    }
}
