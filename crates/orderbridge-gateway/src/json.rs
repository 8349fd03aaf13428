//! JSON response types for the HTTP gateway.

use orderbridge_proto::HealthSignal;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Description of the upstream response source.
    pub source: String,
}

/// Deprecation monitoring response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorResponse {
    /// Classification of the upstream response.
    pub signal: HealthSignal,
    /// Upstream HTTP status.
    pub status_code: u16,
}
