//! Cache key derivation.
//!
//! The key is a deterministic, decodable fingerprint of the validated form
//! input: field names are sorted lexicographically, the object is
//! serialized as canonical JSON and the bytes are base64-encoded. It is
//! deliberately not a cryptographic hash — the full-recipe stage decodes
//! the key to recover the original preferences, so the transform must stay
//! reversible.
//!
//! Order of the `ingredients` sequence itself is not canonicalized:
//! `["a","b"]` and `["b","a"]` produce different keys. That is a documented
//! limitation of the fingerprint, which canonicalizes at the field level
//! only.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Error;
use crate::schema::{FormInput, ValidationError};

/// Decodable fingerprint of a canonicalized [`FormInput`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a validated input.
    ///
    /// Two inputs with identical field contents always map to the same key
    /// regardless of the field order they were built with.
    pub fn derive(input: &FormInput) -> Result<Self, Error> {
        let value = serde_json::to_value(input)?;
        // BTreeMap gives the lexicographic field order the canonical form
        // requires. FormInput serializes to a flat object, so a shallow
        // re-sort is sufficient.
        let sorted: BTreeMap<String, serde_json::Value> = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => {
                return Err(Error::Validation(ValidationError::without_path(
                    "form input did not serialize to a JSON object",
                )))
            }
        };
        let canonical = serde_json::to_string(&sorted)?;
        Ok(Self(BASE64.encode(canonical.as_bytes())))
    }

    /// Recover the canonicalized input this key encodes.
    ///
    /// The key is the sole source of truth for the original preferences at
    /// the full-recipe stage, so the decoded payload is re-validated.
    pub fn decode(&self) -> Result<FormInput, Error> {
        let bytes = BASE64.decode(self.0.as_bytes()).map_err(|e| {
            Error::Validation(ValidationError::without_path(format!(
                "cache key is not valid base64: {}",
                e
            )))
        })?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Validation(ValidationError::without_path(format!(
                "cache key does not decode to JSON: {}",
                e
            )))
        })?;
        FormInput::from_value(&value).map_err(Error::Validation)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
