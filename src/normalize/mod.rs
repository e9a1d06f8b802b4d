//! Cookie record normalization.
//!
//! Turns one raw, loosely-typed record into a canonical [`CookieRecord`]
//! or rejects it with a [`NormalizationError`]. Pure transformation, no I/O.
//!
//! # Behavior
//!
//! - Field lookup walks an ordered alias list per canonical field; the first
//!   present alias wins (see [`RawCookieInput`]).
//! - `sameSite` canonicalization is total: unrecognized or absent values fall
//!   to `unspecified` (unrecognized ones are logged, not rejected).
//! - A `no_restriction` record is forced secure, mirroring the cookie
//!   store's Secure/SameSite coupling rule. Without this the downstream
//!   store would reject the write.
//!
//! # Example
//!
//! ```
//! use cookie_transfer::normalize::{normalize, RawCookieInput};
//! use cookie_transfer::record::SameSite;
//!
//! let raw = RawCookieInput::from_value(&serde_json::json!({
//!     "name": "sid", "value": "abc", "domain": ".example.com",
//!     "sameSite": "None", "secure": false,
//! })).unwrap();
//!
//! let cookie = normalize(&raw, None).unwrap();
//! assert_eq!(cookie.domain, "example.com");
//! assert_eq!(cookie.same_site, SameSite::NoRestriction);
//! assert!(cookie.secure); // forced by the coupling rule
//! ```

mod error;
mod raw;

pub use error::NormalizationError;
pub use raw::{
    DOMAIN_ALIASES, EXPIRATION_ALIASES, HTTP_ONLY_ALIASES, NAME_ALIASES, PATH_ALIASES,
    RawCookieInput, SAME_SITE_ALIASES, SECURE_ALIASES, VALUE_ALIASES,
};

use tracing::{debug, warn};

use crate::record::{CookieRecord, SameSite, canonicalize_domain};

/// Normalizes one raw record into a canonical [`CookieRecord`].
///
/// `fallback_domain` (typically the active page's hostname) is consulted
/// when no domain alias resolves to a non-empty string.
///
/// # Errors
///
/// Returns [`NormalizationError`] when the resolved name is empty or absent,
/// the value is absent, or no usable domain remains after alias and fallback
/// resolution. These are the only failure modes; every other oddity in the
/// input degrades to a documented default.
pub fn normalize(
    raw: &RawCookieInput,
    fallback_domain: Option<&str>,
) -> Result<CookieRecord, NormalizationError> {
    let name = raw
        .resolve_string(NAME_ALIASES)
        .filter(|name| !name.is_empty())
        .ok_or(NormalizationError::MissingName)?;

    let value = raw
        .resolve_string(VALUE_ALIASES)
        .ok_or_else(|| NormalizationError::MissingValue { name: name.clone() })?;

    let domain = raw
        .resolve_string(DOMAIN_ALIASES)
        .filter(|domain| !domain.is_empty())
        .or_else(|| fallback_domain.map(str::to_string))
        .map(|domain| canonicalize_domain(&domain).to_string())
        .filter(|domain| !domain.is_empty())
        .ok_or_else(|| NormalizationError::MissingDomain { name: name.clone() })?;

    let path = raw
        .resolve_string(PATH_ALIASES)
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| "/".to_string());

    let mut secure = raw.resolve_bool(SECURE_ALIASES).unwrap_or(false);
    let http_only = raw.resolve_bool(HTTP_ONLY_ALIASES).unwrap_or(false);
    let same_site = resolve_same_site(raw, &name);

    // The store treats a falsy expiry as "session"; keep that contract.
    let expiration_date = raw
        .resolve_number(EXPIRATION_ALIASES)
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0);

    // Secure/SameSite coupling: applied after all other fields are resolved.
    // A silent, documented override rather than a validation error.
    if same_site == SameSite::NoRestriction && !secure {
        debug!(name = %name, "forcing secure flag for no_restriction cookie");
        secure = true;
    }

    Ok(CookieRecord::new(
        name,
        value,
        domain,
        path,
        secure,
        http_only,
        same_site,
        expiration_date,
    ))
}

/// Total `sameSite` resolution: never fails, only ever produces one of the
/// four canonical values. Unrecognized non-empty input is surfaced as a
/// warning so typos stay visible without changing the output.
fn resolve_same_site(raw: &RawCookieInput, name: &str) -> SameSite {
    let Some(value) = raw.resolve_string(SAME_SITE_ALIASES) else {
        return SameSite::Unspecified;
    };
    match SameSite::from_loose(&value) {
        Some(same_site) => same_site,
        None => {
            warn!(
                name = %name,
                value = %value,
                "unrecognized sameSite value, falling back to unspecified"
            );
            SameSite::Unspecified
        }
    }
}
