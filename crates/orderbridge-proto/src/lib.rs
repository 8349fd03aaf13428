//! orderbridge document vocabulary.
//!
//! This crate defines the shapes that flow through the compatibility engine:
//! the modern (v2) order document, the legacy (v1) order document the old
//! clients were written against, the canonical error envelope, and the health
//! signal produced by deprecation monitoring.
//!
//! # Modules
//!
//! - [`order`] - Modern and legacy order shapes
//! - [`envelope`] - Canonical `{error, message}` envelope
//! - [`health`] - Health signal derived from a status/body pair
//! - [`message`] - Request/response pair exchanged with a response source
//! - [`coerce`] - Lenient JSON field extraction
//! - [`vocab`] - Recognized field names, sentinels and fallback values
//! - [`error`] - Parse error types
//!
//! # Decoding
//!
//! Upstream documents are untrusted JSON. [`ModernOrder::from_document`] never
//! fails: missing or mistyped fields decode to `None` and the translator
//! applies its fallbacks later.
//!
//! ```ignore
//! use orderbridge_proto::ModernOrder;
//!
//! let body = serde_json::json!({ "orderId": "ORD-1", "state": "PAID" });
//! let order = ModernOrder::from_document(&body);
//! assert_eq!(order.state.as_deref(), Some("PAID"));
//! ```

pub mod coerce;
pub mod envelope;
pub mod error;
pub mod health;
pub mod message;
pub mod order;
pub mod vocab;

pub use error::Error;

// Re-export commonly used types at crate root
pub use envelope::ErrorEnvelope;
pub use health::HealthSignal;
pub use message::{ApiRequest, ApiResponse};
pub use order::{
    Amount, LegacyItem, LegacyOrder, LegacyStatus, ModernCustomer, ModernLineItem, ModernOrder,
};
