//! Health signal derived from a status/body pair.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Monitoring verdict for one endpoint response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthSignal {
    /// Endpoint answered normally.
    Ok,
    /// Endpoint was retired on purpose. Must not page on-call.
    Deprecated,
    /// Endpoint is failing.
    Outage,
}

impl HealthSignal {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthSignal::Ok => "OK",
            HealthSignal::Deprecated => "DEPRECATED",
            HealthSignal::Outage => "OUTAGE",
        }
    }

    /// Whether this signal should raise an alert.
    pub fn is_alerting(&self) -> bool {
        matches!(self, HealthSignal::Outage)
    }
}

impl std::fmt::Display for HealthSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HealthSignal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(HealthSignal::Ok),
            "DEPRECATED" => Ok(HealthSignal::Deprecated),
            "OUTAGE" => Ok(HealthSignal::Outage),
            other => Err(Error::UnknownSignal(other.to_string())),
        }
    }
}
