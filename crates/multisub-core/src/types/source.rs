use crate::{MultisubError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// An upstream subscription endpoint.
///
/// Always `http` or `https` with a non-empty host. Surrounding whitespace is
/// trimmed before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Validate and wrap a candidate URL
    pub fn parse(candidate: &str) -> Result<Self> {
        let trimmed = candidate.trim();
        let invalid = |reason: String| MultisubError::InvalidUrl {
            url: candidate.to_string(),
            reason,
        };

        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }

        let has_host = url.host_str().is_some_and(|host| !host.is_empty());
        if !has_host || !has_authority(trimmed, url.scheme()) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self(url))
    }

    /// Returns true if `candidate` would be accepted by [`SourceUrl::parse`]
    #[must_use]
    pub fn is_valid(candidate: &str) -> bool {
        Self::parse(candidate).is_ok()
    }

    /// The URL as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The host component
    #[must_use]
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

/// `scheme://` followed by a non-empty authority, as written.
///
/// `Url::parse` accepts `http:///x`, `http:x` and `http:\\x` with a host
/// taken from the path.
fn has_authority(candidate: &str, scheme: &str) -> bool {
    candidate
        .get(scheme.len()..)
        .and_then(|rest| rest.strip_prefix("://"))
        .is_some_and(|rest| {
            let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
            end > 0
        })
}

impl std::fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SourceUrl {
    type Err = MultisubError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SourceUrl {
    type Error = MultisubError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SourceUrl {
    type Error = MultisubError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<SourceUrl> for String {
    fn from(url: SourceUrl) -> Self {
        url.0.into()
    }
}

impl AsRef<str> for SourceUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
