//! Read-through / merge-write cache adapter over a document store.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::backend::DocumentStore;
use super::key::CacheKey;
use crate::schema::{CachedRecord, RecordPatch};
use crate::Result;

/// Exclusive owner of cached-record access.
///
/// Reads fail soft: a backend fault or a stored document that no longer
/// matches the record schema is logged and treated as a miss, so a storage
/// problem degrades to regeneration instead of a user-facing error. Writes
/// propagate failure — a silently dropped write risks repeated generation
/// cost and wrong `fromCache` reporting.
pub struct RecipeCache {
    store: Arc<dyn DocumentStore>,
}

impl RecipeCache {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Look up the record for a key, treating every fault as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedRecord> {
        let document = match self.store.get(key.as_str()).await {
            Ok(Some(document)) => document,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    backend = self.store.name(),
                    error = %e,
                    "cache read failed, treating as miss"
                );
                return None;
            }
        };
        match CachedRecord::from_value(&document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    backend = self.store.name(),
                    error = %e,
                    "stored record failed validation, treating as miss"
                );
                None
            }
        }
    }

    /// Merge a partial update into the stored record.
    ///
    /// Reads the current document, shallow-merges the patch, stamps
    /// `updatedAt` (and `createdAt` on first write only) and writes the
    /// merged document back. Write faults propagate to the caller.
    pub async fn set(&self, key: &CacheKey, patch: RecordPatch) -> Result<()> {
        let existing = self.get(key).await;
        let merged = patch.apply(existing, key.as_str(), now_millis());
        let document = serde_json::to_value(&merged)?;
        self.store.set(key.as_str(), document).await?;
        tracing::debug!(backend = self.store.name(), key = key.as_str(), "cache write");
        Ok(())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::Error;
    use crate::schema::{FullRecipe, RecipeIdea, RecipeIngredient, SuggestionList};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    fn suggestions() -> SuggestionList {
        SuggestionList {
            suggestions: vec![
                RecipeIdea {
                    title: "One".into(),
                    description: "first".into(),
                },
                RecipeIdea {
                    title: "Two".into(),
                    description: "second".into(),
                },
                RecipeIdea {
                    title: "Three".into(),
                    description: "third".into(),
                },
            ],
        }
    }

    fn recipe() -> FullRecipe {
        FullRecipe {
            title: "Two".into(),
            description: "a recipe".into(),
            servings: 4.0,
            prep_time: "10 minutes".into(),
            cook_time: "20 minutes".into(),
            ingredients: vec![RecipeIngredient {
                name: "flour".into(),
                amount: "1".into(),
                unit: "cup".into(),
            }],
            instructions: vec!["Mix.".into(), "Bake.".into()],
            notes: "none".into(),
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>> {
            Err(Error::storage("backend unavailable"))
        }
        async fn set(&self, _key: &str, _document: Value) -> Result<()> {
            Err(Error::storage("backend unavailable"))
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_get_miss_on_absent_key() {
        let cache = RecipeCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.get(&CacheKey::from("missing")).await.is_none());
    }

    #[tokio::test]
    async fn test_merge_write_preserves_suggestions() {
        let cache = RecipeCache::new(Arc::new(MemoryStore::new()));
        let key = CacheKey::from("k");

        cache
            .set(&key, RecordPatch::suggestions(suggestions(), 0))
            .await
            .unwrap();
        cache
            .set(&key, RecordPatch::full_recipe(recipe()))
            .await
            .unwrap();

        let record = cache.get(&key).await.unwrap();
        assert_eq!(record.suggestions.unwrap(), suggestions());
        assert_eq!(record.full_recipe.unwrap(), recipe());
        assert_eq!(record.cache_key, "k");
    }

    #[tokio::test]
    async fn test_created_at_survives_second_write() {
        let cache = RecipeCache::new(Arc::new(MemoryStore::new()));
        let key = CacheKey::from("k");

        cache
            .set(&key, RecordPatch::suggestions(suggestions(), 0))
            .await
            .unwrap();
        let first = cache.get(&key).await.unwrap();

        cache
            .set(&key, RecordPatch::full_recipe(recipe()))
            .await
            .unwrap();
        let second = cache.get(&key).await.unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_corrupt_document_treated_as_miss() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("k", json!({"cacheKey": "k", "suggestions": "garbage"}))
            .await
            .unwrap();
        let cache = RecipeCache::new(store);
        assert!(cache.get(&CacheKey::from("k")).await.is_none());
    }

    #[tokio::test]
    async fn test_read_fault_swallowed_write_fault_propagated() {
        let cache = RecipeCache::new(Arc::new(FailingStore));
        let key = CacheKey::from("k");

        assert!(cache.get(&key).await.is_none());

        let err = cache
            .set(&key, RecordPatch::suggestions(suggestions(), 0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[tokio::test]
    async fn test_merge_over_corrupt_document_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set("k", json!("not even an object")).await.unwrap();
        let cache = RecipeCache::new(store);
        let key = CacheKey::from("k");

        cache
            .set(&key, RecordPatch::suggestions(suggestions(), 0))
            .await
            .unwrap();
        let record = cache.get(&key).await.unwrap();
        assert!(record.suggestions.is_some());
    }
}
