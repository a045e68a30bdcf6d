use super::SourceUrl;
use crate::MultisubError;
use serde::{Deserialize, Serialize};

/// A named aggregation definition: one stable id, many upstream sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSet {
    /// Stable aggregation identifier used in `/sub/{id}`
    pub id: String,

    /// Human readable title
    pub title: String,

    /// Upstream source URLs, in merge order
    #[serde(default)]
    pub urls: Vec<String>,
}

impl SubscriptionSet {
    /// Create an empty set
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            urls: Vec::new(),
        }
    }

    /// Replace the source list with the valid, trimmed subset of `candidates`.
    ///
    /// Blank candidates are ignored. Invalid ones are left out and returned
    /// so the caller can report them.
    pub fn replace_urls<I, S>(&mut self, candidates: I) -> Vec<MultisubError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rejected = Vec::new();
        self.urls = candidates
            .into_iter()
            .filter_map(|candidate| {
                let candidate = candidate.as_ref().trim();
                if candidate.is_empty() {
                    return None;
                }
                match SourceUrl::parse(candidate) {
                    Ok(_) => Some(candidate.to_string()),
                    Err(err) => {
                        rejected.push(err);
                        None
                    }
                }
            })
            .collect();
        rejected
    }
}
