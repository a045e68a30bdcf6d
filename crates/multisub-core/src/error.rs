use std::time::Duration;
use thiserror::Error;

/// Result type alias for multisub operations
pub type Result<T> = std::result::Result<T, MultisubError>;

/// Errors that can occur while resolving or fetching subscription sources
#[derive(Error, Debug)]
pub enum MultisubError {
    /// Source URL failed scheme/host validation
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected candidate, as supplied
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Upstream answered with something other than 200
    #[error("unexpected HTTP status {code}")]
    Status {
        /// HTTP status code
        code: u16,
    },

    /// Request timed out
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP request failed for any other transport reason
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Aggregation identifier or other resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl MultisubError {
    /// Returns true if this error came from talking to an upstream source
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Timeout(_) | Self::Connection(_) | Self::Http(_)
        )
    }

    /// Returns the HTTP status code if the upstream answered with one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code } => Some(*code),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_classification() {
        assert!(MultisubError::Status { code: 500 }.is_fetch_failure());
        assert!(MultisubError::Timeout(Duration::from_secs(8)).is_fetch_failure());
        assert!(!MultisubError::Config("bad".into()).is_fetch_failure());
        assert!(!MultisubError::InvalidUrl {
            url: "ftp://x".into(),
            reason: "scheme".into()
        }
        .is_fetch_failure());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(MultisubError::Status { code: 503 }.status_code(), Some(503));
        assert_eq!(
            MultisubError::NotFound {
                resource: "set abc".into()
            }
            .status_code(),
            Some(404)
        );
        assert_eq!(MultisubError::Http("reset".into()).status_code(), None);
    }
}
