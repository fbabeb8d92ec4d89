//! Schema validation for every payload the pipeline touches.
//!
//! Each type exposes a `from_value` parse-and-validate boundary that turns
//! an arbitrary [`serde_json::Value`] into a strongly-typed value or fails
//! with a [`ValidationError`] describing the first violated constraint.
//!
//! Validation is structural only (field presence, type, cardinality). It is
//! applied to inbound form input, to generation-provider output before it is
//! trusted or persisted, and to cached records read back from storage — the
//! provider and the store are both untrusted sources.

mod error;
mod form;
mod record;
mod recipe;

pub use error::ValidationError;
pub use form::FormInput;
pub use recipe::{FullRecipe, RecipeIdea, RecipeIngredient, SuggestionList};
pub use record::{CachedRecord, RecordPatch};

use serde_json::{Map, Value};

/// Extract a required string field from an object.
pub(crate) fn require_str(
    obj: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<String, ValidationError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::with_path(
            "must be a string",
            join_path(path, field),
        )),
        None => Err(ValidationError::with_path(
            "is required",
            join_path(path, field),
        )),
    }
}

/// Extract a required string field that must also be non-empty.
pub(crate) fn require_non_empty_str(
    obj: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<String, ValidationError> {
    let s = require_str(obj, field, path)?;
    if s.is_empty() {
        return Err(ValidationError::with_path(
            "must not be empty",
            join_path(path, field),
        ));
    }
    Ok(s)
}

/// Extract a required array field.
pub(crate) fn require_array<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ValidationError> {
    match obj.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ValidationError::with_path(
            "must be an array",
            join_path(path, field),
        )),
        None => Err(ValidationError::with_path(
            "is required",
            join_path(path, field),
        )),
    }
}

/// Interpret a value as a JSON object, failing otherwise.
pub(crate) fn as_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| {
        if path.is_empty() {
            ValidationError::without_path("expected a JSON object")
        } else {
            ValidationError::with_path("expected a JSON object", path)
        }
    })
}

pub(crate) fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}
