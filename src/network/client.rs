//! HTTP client for fetching search-results pages

use super::user_agent::{accept_html, accept_language};
use crate::config::OutgoingSettings;
use crate::error::FetchError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Placeholder in the search URL template
const QUERY_PLACEHOLDER: &str = "{query}";

/// Source of raw search-results pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the results page for `query` and return its body
    async fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// Build the search URL for a query
///
/// The query is percent-encoded and substituted for `{query}`. A template
/// without the placeholder gets the encoded query appended.
pub fn build_search_url(template: &str, query: &str) -> Result<Url, FetchError> {
    let encoded = urlencoding::encode(query);
    let raw = if template.contains(QUERY_PLACEHOLDER) {
        template.replace(QUERY_PLACEHOLDER, &encoded)
    } else {
        format!("{}{}", template, encoded)
    };
    Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Positive, finite timeout in seconds
fn request_timeout(secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => anyhow::bail!("outgoing.request_timeout must be a positive number of seconds, got {}", secs),
    }
}

/// HTTP client wrapper carrying the browser identity and search URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    search_url: String,
    user_agent: String,
    accept_language: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(search_url: impl Into<String>) -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default(), search_url)
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings, search_url: impl Into<String>) -> Result<Self> {
        let timeout = request_timeout(settings.request_timeout)?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        Ok(Self {
            client: builder.build()?,
            search_url: search_url.into(),
            user_agent: settings.user_agent.clone(),
            accept_language: accept_language(&settings.accept_language),
        })
    }

    /// GET a page and return its body if upstream answered 200
    pub async fn get(&self, url: Url) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_html())
            .header("Accept-Language", &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let url = build_search_url(&self.search_url, query)?;
        self.get(url).await
    }
}
