//! Configuration management.
//!
//! Subscription sets live in the same TOML file as the service settings.
//! The file is read once per command; `serve` keeps that snapshot for its
//! whole lifetime.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use multisub::{FetchConfig, PublicBaseUrl, SubscriptionSet};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// CLI and server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL used in subscription links. Falls back to the request host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    /// Address `serve` listens on.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Per-source fetch timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of sources fetched at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Follow upstream redirects.
    #[serde(default)]
    pub follow_redirects: bool,

    /// Default output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Stored subscription sets.
    #[serde(default)]
    pub sets: Vec<SubscriptionSet>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_base_url: None,
            listen: default_listen(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            follow_redirects: false,
            output_format: None,
            sets: Vec::new(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

const fn default_timeout_secs() -> u64 {
    8
}

const fn default_concurrency() -> usize {
    multisub::DEFAULT_CONCURRENCY
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "multisub", "multisub")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Fetch settings derived from this configuration.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .concurrency(self.concurrency)
            .follow_redirects(self.follow_redirects)
    }

    /// Configured public base URL, if any.
    pub fn public_base_url(&self) -> PublicBaseUrl {
        PublicBaseUrl::new(self.public_base_url.as_deref())
    }

    /// Host for links when no public base URL is set.
    ///
    /// This is `listen`, with a wildcard address swapped for loopback.
    pub fn local_link_host(&self) -> String {
        let mut addr = self.listen;
        if addr.ip().is_unspecified() {
            let loopback: IpAddr = match addr.ip() {
                IpAddr::V4(_) => Ipv4Addr::LOCALHOST.into(),
                IpAddr::V6(_) => Ipv6Addr::LOCALHOST.into(),
            };
            addr.set_ip(loopback);
        }
        addr.to_string()
    }

    /// Look up a subscription set by id.
    pub fn find_set(&self, id: &str) -> Option<&SubscriptionSet> {
        self.sets.iter().find(|set| set.id == id)
    }

    /// Insert `set`, replacing one with the same id. Returns true if replaced.
    pub fn upsert_set(&mut self, set: SubscriptionSet) -> bool {
        match self.sets.iter_mut().find(|existing| existing.id == set.id) {
            Some(existing) => {
                *existing = set;
                true
            }
            None => {
                self.sets.push(set);
                false
            }
        }
    }

    /// Remove the set with `id`. Returns true if it existed.
    pub fn remove_set(&mut self, id: &str) -> bool {
        let before = self.sets.len();
        self.sets.retain(|set| set.id != id);
        self.sets.len() != before
    }
}
