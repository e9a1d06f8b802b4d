//! Error type for per-record normalization failures.

use thiserror::Error;

/// Why a single raw record could not be normalized.
///
/// Normalization failures are per-record: they abort only the offending
/// record and are accumulated by the caller, never propagated past a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// The record is not a JSON object at all.
    #[error("cookie entry is not a JSON object")]
    NotAnObject,

    /// No usable name was found under any accepted alias.
    #[error("cookie name is missing or empty")]
    MissingName,

    /// No value field was found (an empty string is acceptable, absence is not).
    #[error("cookie '{name}' has no value field")]
    MissingValue {
        /// The resolved cookie name.
        name: String,
    },

    /// No usable domain was found under any alias or the fallback.
    #[error("cookie '{name}' has no usable domain")]
    MissingDomain {
        /// The resolved cookie name.
        name: String,
    },
}

impl NormalizationError {
    /// Returns the best-available record identifier for error reporting:
    /// the cookie name when it was resolvable, `"unknown"` otherwise.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::MissingValue { name } | Self::MissingDomain { name } => name,
            Self::NotAnObject | Self::MissingName => "unknown",
        }
    }
}
