//! Upstream source fetching.

use crate::config::FetchConfig;
use async_trait::async_trait;
use multisub_core::{MultisubError, Result, SourceUrl};
use reqwest::redirect::Policy;
use reqwest::{Client as HttpClient, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Retrieves the raw body of one subscription source.
///
/// Implementations return a typed failure instead of panicking; the
/// aggregator decides what a failure means for the feed.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the body of `url`. Only a 200 response yields `Ok`.
    async fn fetch(&self, url: &SourceUrl) -> Result<String>;
}

#[async_trait]
impl<F: SourceFetcher + ?Sized> SourceFetcher for Arc<F> {
    async fn fetch(&self, url: &SourceUrl) -> Result<String> {
        (**self).fetch(url).await
    }
}

/// reqwest-backed fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    inner: Arc<FetcherInner>,
}

struct FetcherInner {
    http: HttpClient,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self> {
        HttpFetcherBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::new()
    }

    /// Per-request timeout in effect
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    fn classify(&self, err: &reqwest::Error) -> MultisubError {
        if err.is_timeout() {
            MultisubError::Timeout(self.inner.timeout)
        } else if err.is_connect() {
            MultisubError::Connection(err.to_string())
        } else {
            MultisubError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &SourceUrl) -> Result<String> {
        debug!(url = %url, "GET source");

        let response = self
            .inner
            .http
            .get(url.as_str())
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MultisubError::Status {
                code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.classify(&e))
    }
}

/// Builder for configuring an [`HttpFetcher`]
pub struct HttpFetcherBuilder {
    config: FetchConfig,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcherBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Follow upstream redirects
    #[must_use]
    pub const fn follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = follow;
        self
    }

    /// Build the fetcher
    pub fn build(self) -> Result<HttpFetcher> {
        let redirect = if self.config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .redirect(redirect)
            .gzip(true)
            .build()
            .map_err(|e| MultisubError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpFetcher {
            inner: Arc::new(FetcherInner {
                http,
                timeout: self.config.timeout,
            }),
        })
    }
}
