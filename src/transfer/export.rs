//! Bulk export: store enumeration, policy filtering, document assembly.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use tracing::{debug, instrument};

use super::BulkTransfer;
use super::store::{StoreError, StoreFilter};
use crate::record::CookieRecord;

/// Which part of the store an export covers.
///
/// Serializes into the export document's `domain` field as `"all"` or the
/// literal domain, and deserializes back the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    /// Every domain in the store.
    AllDomains,
    /// One domain (and its subdomains).
    Domain(String),
}

impl ExportScope {
    /// The store enumeration filter for this scope.
    #[must_use]
    pub fn store_filter(&self) -> StoreFilter {
        match self {
            Self::AllDomains => StoreFilter::all(),
            Self::Domain(domain) => StoreFilter::for_domain(domain.clone()),
        }
    }

    /// The document label for this scope.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::AllDomains => "all",
            Self::Domain(domain) => domain,
        }
    }
}

impl Serialize for ExportScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ExportScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label.is_empty() {
            return Err(D::Error::custom("export scope domain is empty"));
        }
        Ok(if label == "all" {
            Self::AllDomains
        } else {
            Self::Domain(label)
        })
    }
}

/// Exclusion policy applied to export candidates.
///
/// A cookie is dropped when it is secure and `include_secure` is false, or
/// http-only and `include_http_only` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportPolicy {
    /// Keep cookies carrying the secure flag.
    pub include_secure: bool,
    /// Keep cookies hidden from page scripts.
    pub include_http_only: bool,
}

impl ExportPolicy {
    /// Returns true when the policy admits this cookie.
    #[must_use]
    pub fn admits(&self, cookie: &CookieRecord) -> bool {
        if cookie.secure && !self.include_secure {
            return false;
        }
        if cookie.http_only && !self.include_http_only {
            return false;
        }
        true
    }
}

impl Default for ExportPolicy {
    /// Includes everything; exclusions are opt-in.
    fn default() -> Self {
        Self {
            include_secure: true,
            include_http_only: true,
        }
    }
}

/// A freshly assembled export document, ready to hand to the download
/// collaborator as JSON. `count` always equals `cookies.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// When the export was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub export_date: OffsetDateTime,
    /// What the export covers.
    #[serde(rename = "domain")]
    pub scope: ExportScope,
    /// Number of cookies in the document.
    pub count: usize,
    /// The surviving records, in store enumeration order.
    pub cookies: Vec<CookieRecord>,
}

impl BulkTransfer {
    /// Exports cookies matching `scope`, filtered by `policy`, into a fresh
    /// [`ExportDocument`]. Read-only: the store is never modified.
    ///
    /// The store already returns canonical-shaped records, so this is a
    /// field projection plus the exclusion policy, not full normalization.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when enumeration fails; nothing was produced
    /// in that case.
    #[instrument(level = "debug", skip(self))]
    pub async fn export_batch(
        &self,
        scope: &ExportScope,
        policy: ExportPolicy,
    ) -> Result<ExportDocument, StoreError> {
        let candidates = self.store.get_all(&scope.store_filter()).await?;
        let total = candidates.len();

        let cookies: Vec<CookieRecord> = candidates
            .into_iter()
            .filter(|cookie| policy.admits(cookie))
            .collect();

        debug!(
            scope = %scope.label(),
            total,
            surviving = cookies.len(),
            "export filter applied"
        );

        Ok(ExportDocument {
            export_date: OffsetDateTime::now_utc(),
            scope: scope.clone(),
            count: cookies.len(),
            cookies,
        })
    }
}
