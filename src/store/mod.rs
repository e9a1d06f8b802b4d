//! In-process cookie store with the browser store's observable semantics.
//!
//! [`MemoryStore`] backs the integration tests and gives embedders without a
//! host cookie store a working default. It keeps the behaviors the engine
//! depends on: last-write-wins by (name, domain, path) identity, the
//! Secure/SameSite rejection rule, scheme-sensitive removal matching, and
//! domain-plus-subdomain enumeration filtering.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use url::Url;

use crate::record::{CookieRecord, SameSite};
use crate::transfer::{CookieStore, StoreError, StoreFilter};

/// A cookie's identity in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CookieKey {
    name: String,
    domain: String,
    path: String,
}

impl CookieKey {
    fn of(record: &CookieRecord) -> Self {
        Self {
            name: record.name.clone(),
            domain: record.domain.clone(),
            path: record.path.clone(),
        }
    }
}

/// An in-memory [`CookieStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cookies: DashMap<CookieKey, CookieRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cookies currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns true when the store holds no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Looks up one cookie by its identity.
    #[must_use]
    pub fn get(&self, name: &str, domain: &str, path: &str) -> Option<CookieRecord> {
        let key = CookieKey {
            name: name.to_string(),
            domain: domain.to_string(),
            path: path.to_string(),
        };
        self.cookies.get(&key).map(|entry| entry.value().clone())
    }

    /// Removes every cookie.
    pub fn clear(&self) {
        self.cookies.clear();
    }

    fn parse_target(url: &str, name: &str) -> Result<Url, StoreError> {
        Url::parse(url).map_err(|error| StoreError::Rejected {
            name: name.to_string(),
            reason: format!("invalid target URL '{url}': {error}"),
        })
    }
}

/// True when `candidate` is `domain` itself or one of its subdomains.
fn domain_matches(candidate: &str, domain: &str) -> bool {
    candidate == domain
        || (candidate.len() > domain.len()
            && candidate.ends_with(domain)
            && candidate.as_bytes()[candidate.len() - domain.len() - 1] == b'.')
}

#[async_trait]
impl CookieStore for MemoryStore {
    async fn get_all(&self, filter: &StoreFilter) -> Result<Vec<CookieRecord>, StoreError> {
        let mut matched: Vec<CookieRecord> = self
            .cookies
            .iter()
            .filter(|entry| match &filter.domain {
                Some(domain) => domain_matches(&entry.key().domain, domain),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect();

        // DashMap iteration order is arbitrary; keep enumeration deterministic.
        matched.sort_by(|a, b| {
            (&a.domain, &a.name, &a.path).cmp(&(&b.domain, &b.name, &b.path))
        });
        Ok(matched)
    }

    async fn set(&self, url: &str, record: &CookieRecord) -> Result<CookieRecord, StoreError> {
        let target = Self::parse_target(url, &record.name)?;

        // The store's consistency rule: no_restriction requires secure.
        if record.same_site == SameSite::NoRestriction && !record.secure {
            return Err(StoreError::Rejected {
                name: record.name.clone(),
                reason: "sameSite=no_restriction requires the secure flag".to_string(),
            });
        }

        // A secure cookie cannot be written from a non-https address.
        if record.secure && target.scheme() != "https" {
            return Err(StoreError::Rejected {
                name: record.name.clone(),
                reason: format!(
                    "secure cookie cannot be set via {} URL",
                    target.scheme()
                ),
            });
        }

        if target.host_str() != Some(record.domain.as_str()) {
            return Err(StoreError::Rejected {
                name: record.name.clone(),
                reason: "target URL host does not cover the cookie domain".to_string(),
            });
        }

        debug!(name = %record.name, domain = %record.domain, "storing cookie");
        self.cookies.insert(CookieKey::of(record), record.clone());
        Ok(record.clone())
    }

    async fn remove(&self, url: &str, name: &str) -> Result<bool, StoreError> {
        let target = Self::parse_target(url, name)?;
        let Some(host) = target.host_str() else {
            return Ok(false);
        };

        let key = CookieKey {
            name: name.to_string(),
            domain: host.to_string(),
            path: target.path().to_string(),
        };

        let Some(entry) = self.cookies.get(&key) else {
            return Ok(false);
        };

        // A secure-stored cookie only matches when addressed over https.
        if entry.secure && target.scheme() != "https" {
            debug!(name = %name, host = %host, "secure cookie not matched over http");
            return Ok(false);
        }
        drop(entry);

        Ok(self.cookies.remove(&key).is_some())
    }
}
