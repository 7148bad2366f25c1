//! Settings structures for price-lookup configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub site: SiteSettings,
    pub debug: DebugSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PRICE_LOOKUP_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("PRICE_LOOKUP_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("PRICE_LOOKUP_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("PRICE_LOOKUP_SEARCH_URL") {
            self.site.search_url = val;
        }
        if let Some(val) = var("PRICE_LOOKUP_USER_AGENT") {
            self.outgoing.user_agent = val;
        }
        if let Some(val) = var("PRICE_LOOKUP_TIMEOUT") {
            if let Ok(timeout) = val.parse::<f64>() {
                if timeout > 0.0 {
                    self.outgoing.request_timeout = timeout;
                }
            }
        }
        if let Some(val) = var("PRICE_LOOKUP_DUMP_HTML") {
            self.debug.dump_html = (!val.is_empty()).then(|| PathBuf::from(val));
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// User agent sent with every search request
    pub user_agent: String,
    /// Accept-Language header value
    pub accept_language: String,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT,
            user_agent: crate::network::DEFAULT_USER_AGENT.to_string(),
            accept_language: "ja-JP".to_string(),
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Target site: where to search and how to read its markup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Search URL; `{query}` is replaced with the encoded query
    pub search_url: String,
    /// Prepended to the scraped price text
    pub currency_symbol: String,
    /// CSS selectors for the result markup
    pub selectors: SelectorSettings,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            search_url: "https://www.amazon.co.jp/s?k={query}".to_string(),
            currency_symbol: "¥".to_string(),
            selectors: SelectorSettings::default(),
        }
    }
}

/// Selector strings, compiled into a `SelectorSet` at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    /// One search-result block
    pub container: String,
    /// Marks a sponsored block, on the block itself or inside it
    pub sponsored: String,
    pub title: String,
    pub price: String,
    pub image: String,
    /// Attribute of the image element holding its URL
    pub image_attr: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            container: r#"div[data-component-type="s-search-result"]"#.to_string(),
            sponsored: "span.s-card-container, .AdHolder".to_string(),
            title: "span.a-text-normal".to_string(),
            price: "span.a-price-whole".to_string(),
            image: "img.s-image".to_string(),
            image_attr: "src".to_string(),
        }
    }
}

/// Debugging aids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Write every fetched page to this file
    pub dump_html: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.outgoing.request_timeout, 10.0);
        assert_eq!(settings.site.currency_symbol, "¥");
        assert!(settings.site.search_url.contains("{query}"));
        assert!(settings.debug.dump_html.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9000
site:
  currency_symbol: "$"
  selectors:
    price: "span.price"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert_eq!(settings.site.currency_symbol, "$");
        assert_eq!(settings.site.selectors.price, "span.price");
        assert_eq!(settings.site.selectors.title, "span.a-text-normal");
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            ("PRICE_LOOKUP_PORT", "3000"),
            ("PRICE_LOOKUP_TIMEOUT", "2.5"),
            ("PRICE_LOOKUP_SEARCH_URL", "http://localhost/s?k={query}"),
            ("PRICE_LOOKUP_DUMP_HTML", "debug.html"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.outgoing.request_timeout, 2.5);
        assert_eq!(settings.site.search_url, "http://localhost/s?k={query}");
        assert_eq!(settings.debug.dump_html, Some(PathBuf::from("debug.html")));
    }

    #[test]
    fn test_merge_vars_ignores_garbage() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "PRICE_LOOKUP_PORT" => Some("not-a-port".to_string()),
            "PRICE_LOOKUP_TIMEOUT" => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.outgoing.request_timeout, 10.0);
    }
}
