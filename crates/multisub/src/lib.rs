//! Merge many proxy subscription feeds into one deduplicated base64 feed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use multisub::Aggregator;
//!
//! #[tokio::main]
//! async fn main() -> multisub::Result<()> {
//!     let aggregator = Aggregator::new()?;
//!
//!     let feed = aggregator
//!         .aggregate(&[
//!             "https://provider-a.example/sub?token=abc",
//!             "https://provider-b.example/api/v1/client/subscribe",
//!         ])
//!         .await;
//!
//!     println!("{feed}");
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/multisub/0.1.0")]

// Re-export core types
pub use multisub_core::*;

// Re-export client
pub use multisub_client::{
    AggregateReport, Aggregator, FetchConfig, HttpFetcher, HttpFetcherBuilder, SourceFetcher,
    SourceOutcome, SourceReport, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT,
};

// Re-export runtime for convenience
pub use tokio;
