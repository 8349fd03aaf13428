//! Deprecation classification.
//!
//! Monitoring that alerts on every non-200 response pages on-call when a
//! version is retired on schedule. The classifier separates the three cases:
//!
//! 1. `200` is [`HealthSignal::Ok`]
//! 2. `410` is [`HealthSignal::Deprecated`] according to the [`DeprecationPolicy`]
//! 3. everything else is [`HealthSignal::Outage`]
//!
//! The default policy only accepts a `410` whose body carries the
//! `API_VERSION_DEPRECATED` error code. A bare `410` from an unknown source is
//! treated as an outage, so only an explicit marker suppresses the alert.

use serde_json::Value;

use orderbridge_proto::coerce;
use orderbridge_proto::vocab::{legacy, DEPRECATION_SENTINEL};
use orderbridge_proto::HealthSignal;

/// HTTP status of a successful response.
pub const STATUS_OK: u16 = 200;

/// HTTP status "Gone" used to retire an endpoint.
pub const STATUS_GONE: u16 = 410;

/// How a `410 Gone` response is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DeprecationPolicy {
    /// Only a 410 carrying the API_VERSION_DEPRECATED code is a deprecation
    #[default]
    RequireSentinel,
    /// Every 410 is a deprecation
    AnyGone,
}

impl std::fmt::Display for DeprecationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeprecationPolicy::RequireSentinel => write!(f, "require-sentinel"),
            DeprecationPolicy::AnyGone => write!(f, "any-gone"),
        }
    }
}

/// Status/body classifier bound to a deprecation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    policy: DeprecationPolicy,
}

impl Classifier {
    /// Create a classifier with the given policy.
    pub fn new(policy: DeprecationPolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect.
    pub fn policy(&self) -> DeprecationPolicy {
        self.policy
    }

    /// Classify one response.
    pub fn classify(&self, status: u16, body: &Value) -> HealthSignal {
        match status {
            STATUS_OK => HealthSignal::Ok,
            STATUS_GONE if self.is_deprecation_marker(body) => HealthSignal::Deprecated,
            _ => HealthSignal::Outage,
        }
    }

    fn is_deprecation_marker(&self, body: &Value) -> bool {
        match self.policy {
            DeprecationPolicy::AnyGone => true,
            DeprecationPolicy::RequireSentinel => {
                coerce::field(body, legacy::ERROR).and_then(Value::as_str)
                    == Some(DEPRECATION_SENTINEL)
            }
        }
    }
}

/// Classify a response with the default policy.
pub fn classify(status: u16, body: &Value) -> HealthSignal {
    Classifier::default().classify(status, body)
}
