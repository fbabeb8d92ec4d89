//! Cached record: the persisted document behind one cache key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{as_object, FullRecipe, SuggestionList, ValidationError};

/// One persisted cache entry, keyed by its cache key.
///
/// The key is duplicated into the body so stored documents are
/// self-describing. Records are created by the suggestions stage and
/// merge-patched by the recipe stage; the core never deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedRecord {
    pub cache_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_recipe: Option<FullRecipe>,
    /// Epoch millis, stamped once on first write.
    pub created_at: u64,
    /// Epoch millis, refreshed on every write.
    pub updated_at: u64,
}

impl CachedRecord {
    /// Parse and validate a stored document.
    ///
    /// Storage is untrusted: a record that does not match this shape is a
    /// schema mismatch the cache adapter treats as a miss.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value, "")?;

        let cache_key = super::require_str(obj, "cacheKey", "")?;

        let suggestions = match obj.get("suggestions") {
            None | Some(Value::Null) => None,
            Some(v) => Some(SuggestionList::from_value(v)?),
        };
        let full_recipe = match obj.get("fullRecipe") {
            None | Some(Value::Null) => None,
            Some(v) => Some(FullRecipe::from_value(v)?),
        };

        let created_at = require_millis(obj, "createdAt")?;
        let updated_at = require_millis(obj, "updatedAt")?;

        Ok(Self {
            cache_key,
            suggestions,
            full_recipe,
            created_at,
            updated_at,
        })
    }
}

fn require_millis(
    obj: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<u64, ValidationError> {
    match obj.get(field) {
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ValidationError::with_path("must be a non-negative integer", field)),
        Some(_) => Err(ValidationError::with_path("must be a number", field)),
        None => Err(ValidationError::with_path("is required", field)),
    }
}

/// Partial update merged into an existing [`CachedRecord`].
///
/// A write never replaces the stored document wholesale: fields absent from
/// the patch keep their current value, so writing `full_recipe` does not
/// erase previously written `suggestions`.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub suggestions: Option<SuggestionList>,
    pub full_recipe: Option<FullRecipe>,
    pub created_at: Option<u64>,
}

impl RecordPatch {
    pub fn suggestions(suggestions: SuggestionList, created_at: u64) -> Self {
        Self {
            suggestions: Some(suggestions),
            full_recipe: None,
            created_at: Some(created_at),
        }
    }

    pub fn full_recipe(recipe: FullRecipe) -> Self {
        Self {
            suggestions: None,
            full_recipe: Some(recipe),
            created_at: None,
        }
    }

    /// Shallow-merge this patch over an existing record, producing the
    /// document to write back.
    ///
    /// `updated_at` is always stamped with `now`; `created_at` keeps the
    /// existing value when one is present, otherwise takes the patch value
    /// or `now`.
    pub fn apply(self, existing: Option<CachedRecord>, cache_key: &str, now: u64) -> CachedRecord {
        let (current_suggestions, current_recipe, current_created) = match existing {
            Some(record) => (
                record.suggestions,
                record.full_recipe,
                Some(record.created_at),
            ),
            None => (None, None, None),
        };

        CachedRecord {
            cache_key: cache_key.to_string(),
            suggestions: self.suggestions.or(current_suggestions),
            full_recipe: self.full_recipe.or(current_recipe),
            created_at: current_created.or(self.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
