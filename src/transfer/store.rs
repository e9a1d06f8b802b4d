//! Cookie store collaborator boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::CookieRecord;

/// Enumeration filter for [`CookieStore::get_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    /// Restrict enumeration to this domain (and its subdomains);
    /// `None` enumerates the whole store.
    pub domain: Option<String>,
}

impl StoreFilter {
    /// A filter that matches every cookie in the store.
    #[must_use]
    pub fn all() -> Self {
        Self { domain: None }
    }

    /// A filter restricted to one domain.
    #[must_use]
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}

/// Errors surfaced by a cookie store implementation.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store refused the write (e.g. the Secure/SameSite coupling rule).
    #[error("cookie store rejected '{name}': {reason}")]
    Rejected {
        /// Name of the offending cookie.
        name: String,
        /// Store-supplied rejection reason.
        reason: String,
    },

    /// The store could not be reached or failed wholesale.
    #[error("cookie store unavailable: {0}")]
    Unavailable(String),
}

/// The authoritative cookie store, addressed by (url, name) for write/delete
/// and by domain filter for enumeration.
///
/// The engine depends only on these three operations and the store's
/// documented rejection rule: a `no_restriction` cookie without the secure
/// flag is refused.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `Arc<dyn CookieStore>`. Rust 2024 native async traits are not
/// object-safe, so `async_trait` is required for the collaborator seam.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Enumerates cookies matching the filter. Records come back in
    /// canonical shape.
    async fn get_all(&self, filter: &StoreFilter) -> Result<Vec<CookieRecord>, StoreError>;

    /// Writes one cookie, addressed by `url`. Overwrites any cookie with the
    /// same (name, domain, path) identity. Returns the stored record.
    async fn set(&self, url: &str, record: &CookieRecord) -> Result<CookieRecord, StoreError>;

    /// Removes the cookie addressed by `(url, name)`. Returns whether a
    /// cookie matched; a secure-stored cookie addressed over `http://` is a
    /// silent non-match, not an error.
    async fn remove(&self, url: &str, name: &str) -> Result<bool, StoreError>;
}
