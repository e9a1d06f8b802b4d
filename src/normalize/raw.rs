//! Loosely-shaped raw cookie input and alias-based field lookup.

use serde_json::{Map, Value};

/// Candidate keys for the cookie name, in priority order.
pub const NAME_ALIASES: &[&str] = &["name", "cookieName", "key"];
/// Candidate keys for the cookie value.
pub const VALUE_ALIASES: &[&str] = &["value", "cookieValue", "val"];
/// Candidate keys for the cookie domain. The caller-supplied fallback domain
/// is consulted after these.
pub const DOMAIN_ALIASES: &[&str] = &["domain", "host", "domainName"];
/// Candidate keys for the cookie path.
pub const PATH_ALIASES: &[&str] = &["path"];
/// Candidate keys for the secure flag.
pub const SECURE_ALIASES: &[&str] = &["secure", "isSecure"];
/// Candidate keys for the http-only flag.
pub const HTTP_ONLY_ALIASES: &[&str] = &["httpOnly", "isHttpOnly"];
/// Candidate keys for the `SameSite` attribute.
pub const SAME_SITE_ALIASES: &[&str] = &["sameSite", "same_site"];
/// Candidate keys for the expiry timestamp.
pub const EXPIRATION_ALIASES: &[&str] = &["expirationDate", "expiry", "expires"];

/// An untrusted, loosely-shaped cookie record as produced by export tools or
/// hand-edited JSON.
///
/// Field lookup walks an ordered list of candidate keys per canonical field
/// (case-sensitive key match, first present alias wins) and applies loose
/// type coercions. A `null` value counts as absent, so lookup continues to
/// the next alias.
#[derive(Debug, Clone, Default)]
pub struct RawCookieInput {
    fields: Map<String, Value>,
}

impl RawCookieInput {
    /// Wraps a JSON object as raw cookie input.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self {
            fields: fields.clone(),
        })
    }

    /// Returns the first non-null value among the candidate keys.
    fn first_present(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .find_map(|key| self.fields.get(*key).filter(|value| !value.is_null()))
    }

    /// Resolves a string field. Scalar non-strings are coerced to their JSON
    /// text; containers are treated as unusable (absent).
    #[must_use]
    pub fn resolve_string(&self, aliases: &[&str]) -> Option<String> {
        match self.first_present(aliases)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// Resolves a boolean field. Accepts JSON booleans, `"true"`/`"false"`
    /// strings (case-insensitive), and numbers (non-zero is true). Anything
    /// else is absent and the caller's default applies.
    #[must_use]
    pub fn resolve_bool(&self, aliases: &[&str]) -> Option<bool> {
        match self.first_present(aliases)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// Resolves a numeric field. Accepts JSON numbers and numeric strings.
    #[must_use]
    pub fn resolve_number(&self, aliases: &[&str]) -> Option<f64> {
        match self.first_present(aliases)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }
}

impl From<Map<String, Value>> for RawCookieInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
