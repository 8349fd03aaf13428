//! Parse error types.

use thiserror::Error;

/// Vocabulary parse errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Value is not a member of the legacy status enum.
    #[error("unknown legacy status: {0}")]
    UnknownStatus(String),

    /// Value is not a known health signal.
    #[error("unknown health signal: {0}")]
    UnknownSignal(String),
}
