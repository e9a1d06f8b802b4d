//! Bulk transfer engine: best-effort import and read-only export over a
//! cookie store collaborator.
//!
//! # Architecture
//!
//! - [`BulkTransfer`] - Orchestrator holding the store collaborator
//! - [`CookieStore`] - Async trait the host environment's store implements
//! - [`TransferResult`] / [`RecordError`] - Accumulated per-record outcomes
//! - [`ExportDocument`] / [`ExportScope`] / [`ExportPolicy`] - Export side
//! - [`ImportError`] - Structural (whole-call) import failures
//!
//! Error handling is two-tier: structural failures (malformed payload) fail
//! the call before any record is touched; per-record failures are isolated
//! and aggregated, never aborting sibling records.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cookie_transfer::store::MemoryStore;
//! use cookie_transfer::transfer::BulkTransfer;
//!
//! # tokio_test::block_on(async {
//! let transfer = BulkTransfer::new(Arc::new(MemoryStore::new()));
//!
//! let result = transfer
//!     .import_json(r#"[{"name": "sid", "value": "abc", "domain": "example.com"}]"#, None)
//!     .await
//!     .unwrap();
//! assert_eq!(result.success_count, 1);
//! # });
//! ```

mod error;
mod export;
mod import;
mod store;

pub use error::{ImportError, SetCookieError};
pub use export::{ExportDocument, ExportPolicy, ExportScope};
pub use import::{RecordError, TransferResult};
pub use store::{CookieStore, StoreError, StoreFilter};

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::normalize::{RawCookieInput, normalize};
use crate::record::{CookieRecord, canonicalize_domain, target_url};

/// Orchestrates normalization and store I/O for cookie batches.
///
/// Stateless between calls: scope and fallback domain are explicit
/// parameters, and the store is the only shared resource. Store calls within
/// a batch are awaited sequentially, which keeps error reporting in input
/// order and makes same-identity conflicts last-write-wins.
pub struct BulkTransfer {
    store: Arc<dyn CookieStore>,
}

impl BulkTransfer {
    /// Creates an engine over the given store collaborator.
    #[must_use]
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// Normalizes and writes a single raw record.
    ///
    /// Convenience for one-off UI edits; with no batch to aggregate into,
    /// both failure tiers surface directly.
    ///
    /// # Errors
    ///
    /// Returns [`SetCookieError`] when normalization fails or the store
    /// refuses the write.
    pub async fn set_cookie(
        &self,
        raw: &Value,
        fallback_domain: Option<&str>,
    ) -> Result<CookieRecord, SetCookieError> {
        let raw = RawCookieInput::from_value(raw)
            .ok_or(crate::normalize::NormalizationError::NotAnObject)?;
        let record = normalize(&raw, fallback_domain)?;
        let stored = self.store.set(&record.target_url(), &record).await?;
        debug!(name = %stored.name, domain = %stored.domain, "cookie set");
        Ok(stored)
    }

    /// Removes one cookie, addressed the same way a write is addressed.
    ///
    /// `secure` must be the flag the cookie was created with: the store
    /// matches on the derived URL, and a secure-stored cookie addressed over
    /// `http://` silently fails to match. `path` defaults to `"/"`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store call itself fails; a non-match
    /// is `Ok(false)`.
    pub async fn remove_cookie(
        &self,
        name: &str,
        domain: &str,
        path: Option<&str>,
        secure: bool,
    ) -> Result<bool, StoreError> {
        let domain = canonicalize_domain(domain);
        let url = target_url(domain, path.unwrap_or("/"), secure);
        let removed = self.store.remove(&url, name).await?;
        debug!(name = %name, domain = %domain, removed, "cookie removal attempted");
        Ok(removed)
    }
}
