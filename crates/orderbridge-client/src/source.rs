//! The response source contract.

use async_trait::async_trait;

use orderbridge_proto::{ApiRequest, ApiResponse};

use crate::error::Error;

/// Supplies a status code and parsed JSON body for a request.
///
/// Implementations must fail with an error, rather than return a malformed
/// value, when the transport succeeds but the payload is not JSON. Any HTTP
/// status, including 4xx and 5xx, is a successful fetch.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// Fetch the response for one request.
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, Error>;

    /// Short description used in logs and health output.
    fn describe(&self) -> String;
}
