//! Canonical error envelope.

use serde::{Deserialize, Serialize};

/// Canonical single-error envelope: `{error, message}`.
///
/// This is the v1 format and the only one legacy consumers can display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorEnvelope {
    /// Create a new envelope.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// Render as a JSON document.
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.error,
            "message": self.message,
        })
    }
}
