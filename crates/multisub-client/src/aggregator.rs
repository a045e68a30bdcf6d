//! Merging many subscription sources into one feed.

use crate::config::FetchConfig;
use crate::fetcher::{HttpFetcher, SourceFetcher};
use futures_util::stream::{self, StreamExt};
use multisub_core::{normalize_payload, EncodedFeed, MergedEntrySet, MultisubError, Result, SourceUrl};
use serde::{Serialize, Serializer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What happened to one candidate source during aggregation
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Failed validation, never fetched
    Skipped {
        /// Validation failure
        #[serde(serialize_with = "display")]
        reason: MultisubError,
    },
    /// Fetch failed, contributed nothing
    Failed {
        /// Transport or status failure
        #[serde(serialize_with = "display")]
        error: MultisubError,
    },
    /// Fetched and normalized
    Fetched {
        /// Entries the payload normalized to
        entries: usize,
        /// Entries not already contributed by an earlier source
        added: usize,
    },
}

/// Outcome for one candidate URL
#[derive(Debug, Serialize)]
pub struct SourceReport {
    /// Candidate as supplied (trimmed)
    pub url: String,
    /// What happened to it
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

/// Full result of one aggregation run
#[derive(Debug, Serialize)]
pub struct AggregateReport {
    /// One report per non-blank candidate, in input order
    pub sources: Vec<SourceReport>,
    /// Merged, deduplicated entries
    pub merged: MergedEntrySet,
}

impl AggregateReport {
    /// Encode the merged entries into the final feed
    #[must_use]
    pub fn encode(&self) -> EncodedFeed {
        self.merged.encode()
    }

    /// Number of sources that were fetched successfully
    #[must_use]
    pub fn fetched(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.outcome, SourceOutcome::Fetched { .. }))
            .count()
    }
}

/// Fetches, normalizes and merges subscription sources.
///
/// Sources are fetched concurrently but always merged in input order, so the
/// feed depends only on the URL list and what each source returns.
#[derive(Clone)]
pub struct Aggregator<F = HttpFetcher> {
    fetcher: F,
    timeout: Duration,
    concurrency: usize,
}

impl Aggregator<HttpFetcher> {
    /// Aggregator over HTTP with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Aggregator over HTTP with custom settings
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let fetcher = HttpFetcher::builder().config(config.clone()).build()?;
        Ok(Self::with_fetcher(fetcher, &config))
    }
}

impl<F: SourceFetcher> Aggregator<F> {
    /// Aggregator over any fetcher
    pub fn with_fetcher(fetcher: F, config: &FetchConfig) -> Self {
        Self {
            fetcher,
            timeout: config.timeout,
            concurrency: config.concurrency.max(1),
        }
    }

    /// The underlying fetcher
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Merge all sources into the encoded feed.
    ///
    /// Never fails: invalid and unreachable sources are logged and skipped.
    /// Yields an empty feed when nothing was contributed.
    pub async fn aggregate<S: AsRef<str>>(&self, urls: &[S]) -> EncodedFeed {
        self.aggregate_report(urls).await.encode()
    }

    /// Like [`Aggregator::aggregate`], keeping the per-source outcomes
    pub async fn aggregate_report<S: AsRef<str>>(&self, urls: &[S]) -> AggregateReport {
        let candidates: Vec<(String, Result<SourceUrl>)> = urls
            .iter()
            .map(|candidate| candidate.as_ref().trim())
            .filter(|candidate| !candidate.is_empty())
            .map(|candidate| {
                let parsed = SourceUrl::parse(candidate);
                if let Err(err) = &parsed {
                    warn!(url = %candidate, error = %err, "Skipping invalid source URL");
                }
                (candidate.to_string(), parsed)
            })
            .collect();

        debug!(
            candidates = candidates.len(),
            concurrency = self.concurrency,
            "Fetching sources"
        );

        // `buffered` yields in input order regardless of completion order.
        let fetched: Vec<(String, std::result::Result<String, SourceOutcome>)> =
            stream::iter(candidates)
                .map(|(raw, parsed)| async move {
                    let payload = match parsed {
                        Ok(url) => self.fetch_one(&url).await,
                        Err(reason) => Err(SourceOutcome::Skipped { reason }),
                    };
                    (raw, payload)
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut merged = MergedEntrySet::new();
        let mut sources = Vec::with_capacity(fetched.len());

        for (url, payload) in fetched {
            let outcome = match payload {
                Ok(body) => {
                    let entries = normalize_payload(&body);
                    let total = entries.len();
                    let added = merged.merge(entries);
                    debug!(url = %url, entries = total, added, "Merged source");
                    SourceOutcome::Fetched {
                        entries: total,
                        added,
                    }
                }
                Err(outcome) => outcome,
            };
            sources.push(SourceReport { url, outcome });
        }

        let report = AggregateReport { sources, merged };
        info!(
            sources = report.sources.len(),
            fetched = report.fetched(),
            entries = report.merged.len(),
            "Aggregated subscription feed"
        );
        report
    }

    async fn fetch_one(&self, url: &SourceUrl) -> std::result::Result<String, SourceOutcome> {
        let result = tokio::time::timeout(self.timeout, self.fetcher.fetch(url))
            .await
            .unwrap_or_else(|_| Err(MultisubError::Timeout(self.timeout)));

        result.map_err(|error| {
            match error.status_code() {
                Some(code) => warn!(url = %url, status = code, "Non-200 response from source"),
                None => warn!(url = %url, error = %error, "Failed to fetch source"),
            }
            SourceOutcome::Failed { error }
        })
    }
}

fn display<S: Serializer>(
    value: &MultisubError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
