//! Response source error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Response source errors.
///
/// Every variant is a transport-level failure. HTTP error statuses are not
/// errors; they are returned to the caller as data.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP call failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP call did not complete in time.
    #[error("request to {url} timed out")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// The response body is not valid JSON.
    #[error("response from {url} is not JSON (status {status}): {source}")]
    NotJson {
        /// Requested URL.
        url: String,
        /// HTTP status of the response.
        status: u16,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// No canned response matches the request.
    #[error("no canned response for {method} {path} {query:?}")]
    NoFixture {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
        /// Request query.
        query: BTreeMap<String, String>,
    },

    /// The fixture table could not be parsed.
    #[error("invalid fixture table: {0}")]
    Fixture(String),

    /// The configured base URL is unusable.
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl {
        /// Configured URL.
        url: String,
        /// Parse failure.
        reason: String,
    },

    /// The request method is not a valid HTTP method.
    #[error("invalid http method: {0}")]
    InvalidMethod(String),

    /// Reading a fixture file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Transport(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            _ => false,
        }
    }
}
