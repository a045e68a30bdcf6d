//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Merge many proxy subscription feeds into one
///
/// Fetches every source of a subscription set, decodes base64 feeds,
/// drops duplicate entries and serves the result as a single base64 feed.
#[derive(Parser, Debug)]
#[command(name = "multisub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MULTISUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch sources and print the merged feed
    Aggregate(AggregateArgs),

    /// Serve /sub/{id} over HTTP
    Serve(ServeArgs),

    /// Print the public subscription link of a set
    Link(LinkArgs),

    /// Manage subscription sets
    Sets(SetsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ============================================================================
// Aggregate command
// ============================================================================

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Source URLs, merged in the order given
    pub urls: Vec<String>,

    /// Use the sources of a stored subscription set (merged first)
    #[arg(short, long)]
    pub set: Option<String>,

    /// Print the merged entries instead of the base64 feed
    #[arg(short, long)]
    pub decode: bool,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `listen` in the config)
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,
}

// ============================================================================
// Link command
// ============================================================================

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Subscription set id
    pub id: String,

    /// Public base URL (overrides `public_base_url` in the config)
    #[arg(short, long)]
    pub base_url: Option<String>,
}

// ============================================================================
// Sets command
// ============================================================================

#[derive(Args, Debug)]
pub struct SetsArgs {
    #[command(subcommand)]
    pub command: SetsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SetsCommands {
    /// List stored subscription sets
    List,

    /// Create a set, or replace the sources of an existing one
    Add {
        /// Stable id, used in /sub/{id}
        id: String,

        /// Title of the set
        #[arg(short, long)]
        title: Option<String>,

        /// Source URL (repeatable, merged in order)
        #[arg(short, long = "url")]
        urls: Vec<String>,
    },

    /// Delete a set
    Remove {
        /// Subscription set id
        id: String,
    },
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., public_base_url, timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
