//! orderbridge compatibility engine.
//!
//! Three independent, pure routines keep a legacy (v1) client working against
//! a service that moved to the v2 schema:
//!
//! - [`translate`] maps a v2 order onto the legacy-safe shape
//! - [`classify`] tells a deliberate deprecation apart from an outage
//! - [`normalize`] folds either error envelope into the canonical `{error, message}`
//!
//! None of them fail. Malformed but valid JSON is handled through documented
//! fallbacks, so callers only deal with errors at the transport boundary.
//!
//! # Example
//!
//! ```ignore
//! use orderbridge_core::{classify, normalize, translate_document};
//! use orderbridge_proto::HealthSignal;
//! use serde_json::json;
//!
//! let legacy = translate_document(&json!({"state": "FULFILLED"}));
//! assert_eq!(legacy.status.as_str(), "PAID");
//! assert_eq!(legacy.items.len(), 1);
//!
//! let signal = classify(410, &json!({"error": "API_VERSION_DEPRECATED"}));
//! assert_eq!(signal, HealthSignal::Deprecated);
//!
//! let envelope = normalize(400, &json!({"errors": [{"code": "X", "message": "y"}]}));
//! assert_eq!(envelope.error, "X");
//! ```

pub mod classify;
pub mod normalize;
pub mod translate;

pub use classify::{classify, Classifier, DeprecationPolicy};
pub use normalize::normalize;
pub use translate::{translate, translate_document};
