//! Subscription fetching and aggregation for multisub.
//!
//! This crate provides the [`Aggregator`], which turns an ordered list of
//! source URLs into one merged [`EncodedFeed`](multisub_core::EncodedFeed),
//! and the [`HttpFetcher`] it uses to talk to upstream providers.

#![doc(html_root_url = "https://docs.rs/multisub-client/0.1.0")]

mod aggregator;
mod config;
mod fetcher;

pub use aggregator::{AggregateReport, Aggregator, SourceOutcome, SourceReport};
pub use config::*;
pub use fetcher::{HttpFetcher, HttpFetcherBuilder, SourceFetcher};
pub use multisub_core::{MultisubError, Result};
