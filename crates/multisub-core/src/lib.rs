//! Core types and payload handling for multisub.
//!
//! This crate provides the I/O-free parts of subscription aggregation:
//!
//! - **Types**: [`SourceUrl`], [`Entry`], [`MergedEntrySet`], [`EncodedFeed`]
//!   and the [`SubscriptionSet`] definition
//! - **Detection**: deciding whether a payload is base64-encoded proxy data
//! - **Normalization**: splitting a payload into ordered entries
//! - **Errors**: [`MultisubError`]
//!
//! # Example
//!
//! ```rust
//! use multisub_core::{normalize_payload, MergedEntrySet};
//!
//! let mut merged = MergedEntrySet::new();
//! merged.merge(normalize_payload("dm1lc3M6Ly9hCnZtZXNzOi8vYg=="));
//! merged.merge(normalize_payload("vmess://b\nvmess://c"));
//!
//! assert_eq!(merged.joined(), "vmess://a\nvmess://b\nvmess://c");
//! ```

#![doc(html_root_url = "https://docs.rs/multisub-core/0.1.0")]

pub mod detect;
mod error;
pub mod normalize;
pub mod types;

pub use detect::{decode_base64_payload, is_base64_payload, PROXY_SCHEMES};
pub use error::{MultisubError, Result};
pub use normalize::normalize_payload;
pub use types::*;
