//! # multisub-cli
//!
//! Command-line tool and HTTP endpoint for merged proxy subscription feeds.
//!
//! ## Features
//!
//! - **Aggregate**: merge any list of source URLs into one base64 feed
//! - **Subscription sets**: named source lists stored in a TOML config
//! - **Serve**: `GET /sub/{id}` returns the merged feed of a set
//! - **Links**: public subscription links from a configured base URL
//! - **Multiple output formats**: plain feed, JSON, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod server;

pub use cli::run;
