//! Response source configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::Error;
use crate::fixture::FixtureSource;
use crate::http::HttpSource;
use crate::source::ResponseSource;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries for transport failures.
pub const DEFAULT_RETRIES: usize = 0;

/// Default pause between retries.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Selects and configures a response source.
///
/// A non-blank `base_url` selects the live HTTP source; otherwise canned
/// fixtures are used, from `fixtures_path` when set or the built-in table.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the live API, e.g. `https://api.example.com`.
    pub base_url: Option<String>,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Number of retries for retryable transport failures.
    pub retries: usize,

    /// Pause between retries.
    pub retry_backoff: Duration,

    /// Fixture table to use instead of the built-in one.
    pub fixtures_path: Option<PathBuf>,
}

impl SourceConfig {
    /// Create a configuration using the built-in fixtures.
    pub fn fixtures() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            fixtures_path: None,
        }
    }

    /// Create a configuration for a live API.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::fixtures().with_base_url(Some(base_url.into()))
    }

    /// Set the base URL. Blank values are treated as unset.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry count.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Set the pause between retries.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the fixture table path.
    pub fn with_fixtures_path(mut self, path: Option<PathBuf>) -> Self {
        self.fixtures_path = path;
        self
    }

    /// Whether this configuration selects the live HTTP source.
    pub fn is_live(&self) -> bool {
        self.base_url.is_some()
    }

    /// Build the selected response source.
    pub fn build(&self) -> Result<Box<dyn ResponseSource>, Error> {
        let source: Box<dyn ResponseSource> = match (&self.base_url, &self.fixtures_path) {
            (Some(_), _) => Box::new(HttpSource::new(self)?),
            (None, Some(path)) => Box::new(FixtureSource::from_path(path)?),
            (None, None) => Box::new(FixtureSource::embedded()?),
        };
        info!(source = %source.describe(), "response source ready");
        Ok(source)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::fixtures()
    }
}
