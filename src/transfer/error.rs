//! Structural error types for transfer operations.

use thiserror::Error;

use super::store::StoreError;
use crate::normalize::NormalizationError;

/// Hard failure of an entire import call, raised before any record is
/// touched. Per-record problems never appear here; they are accumulated in
/// [`TransferResult`](super::TransferResult) instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload is not valid JSON at all.
    #[error("import payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is neither a cookie array nor an object with
    /// a `cookies` array field.
    #[error("import payload must be a cookie array or an object with a 'cookies' array, got {found}")]
    InvalidShape {
        /// What the payload actually was.
        found: &'static str,
    },
}

/// Failure of the single-record set path, where there is no batch to
/// aggregate into: either tier surfaces directly.
#[derive(Debug, Error)]
pub enum SetCookieError {
    /// The record failed normalization.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// The store refused or failed the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}
