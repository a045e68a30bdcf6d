//! Fetch configuration types.

use std::time::Duration;

/// Default per-source timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Default number of sources fetched at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// How sources are fetched during one aggregation
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout applied to each source independently
    pub timeout: Duration,

    /// Maximum number of sources in flight
    pub concurrency: usize,

    /// User-Agent sent upstream
    pub user_agent: String,

    /// Follow 3xx responses instead of treating them as failures
    pub follow_redirects: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchConfig {
    /// Create a configuration with the default timeout and concurrency
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: format!("multisub/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: false,
        }
    }

    /// Set the per-source timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of concurrent fetches (at least one)
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Follow redirects from upstream sources
    #[must_use]
    pub const fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}
