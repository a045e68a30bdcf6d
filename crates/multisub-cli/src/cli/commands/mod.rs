//! Command implementations.

pub mod aggregate;
pub mod config;
pub mod link;
pub mod serve;
pub mod sets;

use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Printed when links fall back to the local listen address.
const LOCAL_LINK_HINT: &str =
    "No public_base_url configured; set one with `multisub config set public_base_url <URL>` for links other machines can use.";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,

    /// Where the configuration was loaded from (and is saved to)
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Persist `config` to the file this context was loaded from.
    pub fn save(&self, config: &Config) -> anyhow::Result<()> {
        config.save_to(&self.config_path)
    }

    /// Look up a set or fail with a helpful message.
    pub fn require_set(&self, id: &str) -> anyhow::Result<&multisub::SubscriptionSet> {
        self.config.find_set(id).ok_or_else(|| {
            anyhow::Error::new(multisub::MultisubError::NotFound {
                resource: format!("subscription set {id:?}"),
            })
            .context("Run `multisub sets list` to see the stored sets.")
        })
    }
}
