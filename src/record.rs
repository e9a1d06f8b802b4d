//! Canonical cookie record and store-addressing helpers.
//!
//! A [`CookieRecord`] is the engine's unit of work: a cookie that has passed
//! normalization and is safe to hand to a cookie store. The serialized field
//! names match the JSON export document (`httpOnly`, `sameSite`,
//! `expirationDate`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The cookie `SameSite` attribute, restricted to the store's four values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    /// Cookie is only sent in a first-party context.
    Strict,
    /// Cookie is withheld on cross-site subrequests but sent on navigation.
    Lax,
    /// Cookie is sent in all contexts. The store requires `Secure` for this.
    NoRestriction,
    /// No SameSite attribute was specified.
    #[default]
    Unspecified,
}

impl SameSite {
    /// Matches a loose input string against the canonical values,
    /// case-insensitively. `none` and `no_restriction` are synonyms.
    ///
    /// Returns `None` for unrecognized input so callers can decide whether
    /// to surface the fallback; the canonical fallback is [`SameSite::Unspecified`].
    #[must_use]
    pub fn from_loose(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "none" | "no_restriction" => Some(Self::NoRestriction),
            "unspecified" => Some(Self::Unspecified),
            _ => None,
        }
    }

    /// Returns the canonical wire name for this value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lax => "lax",
            Self::NoRestriction => "no_restriction",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical cookie record.
///
/// The value field is intentionally redacted in Debug output to prevent
/// accidental logging of sensitive cookie data.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    /// Cookie name (non-empty).
    pub name: String,
    /// Cookie value (sensitive — never log). May be empty.
    value: String,
    /// The domain the cookie belongs to, without a leading dot.
    pub domain: String,
    /// The URL path scope for the cookie.
    #[serde(default = "default_path")]
    pub path: String,
    /// Whether the cookie should only be sent over HTTPS.
    #[serde(default)]
    pub secure: bool,
    /// Whether the cookie is hidden from page scripts.
    #[serde(default)]
    pub http_only: bool,
    /// The cookie's `SameSite` attribute.
    #[serde(default)]
    pub same_site: SameSite,
    /// Expiry as epoch seconds; `None` means session cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<f64>,
}

fn default_path() -> String {
    "/".to_string()
}

impl CookieRecord {
    /// Creates a new canonical record.
    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        secure: bool,
        http_only: bool,
        same_site: SameSite,
        expiration_date: Option<f64>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            secure,
            http_only,
            same_site,
            expiration_date,
        }
    }

    /// Returns the cookie value.
    ///
    /// Cookie values are sensitive — avoid logging the return value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true when this is a session cookie (no expiry).
    #[must_use]
    pub fn is_session(&self) -> bool {
        self.expiration_date.is_none()
    }

    /// Builds the URL used to address this record in the cookie store.
    ///
    /// The same URL addresses the record for both writing and deletion, so
    /// the effective `secure` flag must match the one used at creation time
    /// or a later removal will silently miss (see [`target_url`]).
    #[must_use]
    pub fn target_url(&self) -> String {
        target_url(&self.domain, &self.path, self.secure)
    }
}

// Custom Debug impl that redacts the cookie value.
impl fmt::Debug for CookieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieRecord")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("secure", &self.secure)
            .field("http_only", &self.http_only)
            .field("same_site", &self.same_site)
            .field("expiration_date", &self.expiration_date)
            .finish()
    }
}

/// Builds the store-addressing URL for a cookie identity.
///
/// Uses `https://` when the cookie is secure and `http://` otherwise. A
/// secure-stored cookie addressed over `http://` will not match at the store
/// layer, so removal must use the same `secure` flag the write used.
#[must_use]
pub fn target_url(domain: &str, path: &str, secure: bool) -> String {
    let scheme = if secure { "https" } else { "http" };
    format!("{scheme}://{domain}{path}")
}

/// Strips a single leading `.` from a store domain.
///
/// The leading dot is a store-level wildcard marker, not meaningful as a URL
/// host. Exactly one dot is removed: `"..x.com"` becomes `".x.com"`.
#[must_use]
pub fn canonicalize_domain(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(secure: bool) -> CookieRecord {
        CookieRecord::new(
            "session".to_string(),
            "abc123".to_string(),
            "example.com".to_string(),
            "/".to_string(),
            secure,
            false,
            SameSite::Lax,
            None,
        )
    }

    #[test]
    fn test_same_site_from_loose_case_insensitive() {
        assert_eq!(SameSite::from_loose("Strict"), Some(SameSite::Strict));
        assert_eq!(SameSite::from_loose("LAX"), Some(SameSite::Lax));
        assert_eq!(SameSite::from_loose("None"), Some(SameSite::NoRestriction));
        assert_eq!(
            SameSite::from_loose("no_restriction"),
            Some(SameSite::NoRestriction)
        );
        assert_eq!(
            SameSite::from_loose("unspecified"),
            Some(SameSite::Unspecified)
        );
    }

    #[test]
    fn test_same_site_from_loose_rejects_unknown() {
        assert_eq!(SameSite::from_loose("bogus"), None);
        // Exact matches only: trailing whitespace is not trimmed.
        assert_eq!(SameSite::from_loose("Lax "), None);
        assert_eq!(SameSite::from_loose(""), None);
    }

    #[test]
    fn test_same_site_serializes_snake_case() {
        let json = serde_json::to_string(&SameSite::NoRestriction).unwrap();
        assert_eq!(json, "\"no_restriction\"");
    }

    #[test]
    fn test_target_url_non_secure() {
        assert_eq!(record(false).target_url(), "http://example.com/");
    }

    #[test]
    fn test_target_url_secure() {
        assert_eq!(record(true).target_url(), "https://example.com/");
    }

    #[test]
    fn test_target_url_includes_path() {
        assert_eq!(target_url("x.com", "/api", true), "https://x.com/api");
    }

    #[test]
    fn test_canonicalize_domain_strips_one_dot() {
        assert_eq!(canonicalize_domain(".x.com"), "x.com");
        assert_eq!(canonicalize_domain("x.com"), "x.com");
        assert_eq!(canonicalize_domain("..x.com"), ".x.com");
    }

    #[test]
    fn test_debug_redacts_value() {
        let debug_str = format!("{:?}", record(false));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("abc123"));
    }

    #[test]
    fn test_serde_uses_export_document_field_names() {
        let mut cookie = record(true);
        cookie.http_only = true;
        cookie.expiration_date = Some(1_700_000_000.0);
        let json = serde_json::to_value(&cookie).unwrap();
        assert_eq!(json["httpOnly"], serde_json::json!(true));
        assert_eq!(json["sameSite"], serde_json::json!("lax"));
        assert_eq!(json["expirationDate"], serde_json::json!(1_700_000_000.0));
    }

    #[test]
    fn test_serde_omits_absent_expiration() {
        let json = serde_json::to_value(&record(false)).unwrap();
        assert!(json.get("expirationDate").is_none());
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let cookie: CookieRecord =
            serde_json::from_str(r#"{"name":"a","value":"b","domain":"x.com"}"#).unwrap();
        assert_eq!(cookie.path, "/");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Unspecified);
        assert!(cookie.is_session());
    }
}
