//! Error taxonomy
//!
//! Argument problems are reported synchronously as [`PlaceError`] before any
//! work is scheduled. Everything that can go wrong once a fetch is under way
//! is reported through [`FetchResult`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use thiserror::Error;

/// Synchronous failure raised before any I/O is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceError {
    /// A size, count, range or category the caller passed is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A network-backed operation was called outside of a tokio runtime
    #[error("No tokio runtime available to run the request on")]
    NoRuntime,
}

impl PlaceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PlaceError::InvalidArgument(message.into())
    }
}

/// Failure delivered through the completion of an asynchronous fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, body read)
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    /// The provider answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The response body could not be turned into the expected output
    #[error("Could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl FetchError {
    /// True for failures that happened before any bytes could be decoded
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Status { .. })
    }

    pub fn is_decode_failure(&self) -> bool {
        matches!(self, FetchError::Decode { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Single-delivery outcome of an asynchronous retrieval
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_categories() {
        let transport = FetchError::Transport {
            url: "https://a".into(),
            reason: "refused".into(),
        };
        let status = FetchError::Status {
            url: "https://a".into(),
            status: 503,
        };
        let decode = FetchError::Decode {
            url: "https://a".into(),
            reason: "garbage".into(),
        };

        assert!(transport.is_transport_failure());
        assert!(status.is_transport_failure());
        assert!(!decode.is_transport_failure());
        assert!(decode.is_decode_failure());
        assert!(!status.is_decode_failure());
    }

    #[test]
    fn test_error_messages_name_the_url() {
        let err = FetchError::Status {
            url: "https://placekitten.com/1/1".into(),
            status: 404,
        };
        assert_eq!(err.url(), "https://placekitten.com/1/1");
        assert_eq!(err.to_string(), "https://placekitten.com/1/1 returned HTTP 404");
    }
}
