//! Live HTTP response source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use tracing::{debug, warn};

use orderbridge_proto::{ApiRequest, ApiResponse};

use crate::config::SourceConfig;
use crate::error::Error;
use crate::source::ResponseSource;

/// Response source that calls a live API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    retries: usize,
    retry_backoff: Duration,
}

impl HttpSource {
    /// Create a source from a configuration with a base URL.
    pub fn new(config: &SourceConfig) -> Result<Self, Error> {
        let raw = config.base_url.as_deref().unwrap_or_default();
        Url::parse(raw).map_err(|e| Error::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: raw.trim_end_matches('/').to_string(),
            retries: config.retries,
            retry_backoff: config.retry_backoff,
        })
    }

    /// Full URL for a request path, without the query string.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<ApiResponse, Error> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::InvalidMethod(request.method.clone()))?;
        let url = self.url_for(&request.path);

        let response = self
            .client
            .request(method, &url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| classify_send_error(e, &url))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_send_error(e, &url))?;

        let body = serde_json::from_slice(&bytes).map_err(|source| Error::NotJson {
            url: url.clone(),
            status,
            source,
        })?;

        debug!(url = %url, status, "http response");
        Ok(ApiResponse::new(status, body))
    }
}

fn classify_send_error(err: reqwest::Error, url: &str) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        Error::Transport(err)
    }
}

#[async_trait]
impl ResponseSource for HttpSource {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, Error> {
        let mut attempt = 0;
        loop {
            match self.send_once(request).await {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        request = %request,
                        attempt,
                        retries = self.retries,
                        error = %err,
                        "retrying request"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
                result => return result,
            }
        }
    }

    fn describe(&self) -> String {
        format!("http ({})", self.base_url)
    }
}
