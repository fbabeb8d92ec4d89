//! Two-stage generation orchestrator.
//!
//! Coordinates validate → derive key → cache lookup → generate → validate
//! output → persist for both stages. Per request it performs at most one
//! provider call and at most two store calls, sequentially. Concurrent
//! cache misses for the same key may each invoke the provider; both writes
//! merge and the results are interchangeable, so no per-key lock is held.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::cache::{CacheKey, DocumentStore, RecipeCache};
use crate::error::Error;
use crate::provider::GenerationProvider;
use crate::schema::{
    FormInput, FullRecipe, RecipeIdea, RecordPatch, SuggestionList, ValidationError,
};
use crate::Result;

/// Success body of the suggestions stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub suggestions: Vec<RecipeIdea>,
    pub cache_key: String,
    pub from_cache: bool,
}

/// Success body of the full-recipe stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub recipe: FullRecipe,
    pub from_cache: bool,
}

/// Orchestrator tying the provider and the cache together.
///
/// Both collaborators are injected; the engine holds no global state and
/// never talks to the persistence provider directly.
pub struct RecipeEngine {
    provider: Arc<dyn GenerationProvider>,
    cache: RecipeCache,
}

impl RecipeEngine {
    pub fn new(provider: Arc<dyn GenerationProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            provider,
            cache: RecipeCache::new(store),
        }
    }

    /// Suggestions stage: validated input to three titled ideas.
    ///
    /// Idempotent under cache hits: a record that already holds suggestions
    /// is returned as-is with `fromCache=true`. A stored record lacking
    /// suggestions counts as absent. Provider output failing validation is
    /// reported as a generation error and never cached.
    pub async fn suggest(&self, raw_input: &Value) -> Result<SuggestionsResponse> {
        let input = FormInput::from_value(raw_input)?;
        let key = CacheKey::derive(&input)?;

        if let Some(record) = self.cache.get(&key).await {
            if let Some(list) = record.suggestions {
                tracing::debug!(key = key.as_str(), "suggestions served from cache");
                return Ok(SuggestionsResponse {
                    suggestions: list.suggestions,
                    cache_key: key.to_string(),
                    from_cache: true,
                });
            }
        }

        let output = self.provider.suggest(&input).await?;
        let list = SuggestionList::from_value(&output)
            .map_err(|e| Error::generation(format!("provider returned invalid suggestions: {}", e)))?;

        self.cache
            .set(&key, RecordPatch::suggestions(list.clone(), now_millis()))
            .await?;
        tracing::debug!(
            provider = self.provider.name(),
            key = key.as_str(),
            "suggestions generated and cached"
        );

        Ok(SuggestionsResponse {
            suggestions: list.suggestions,
            cache_key: key.to_string(),
            from_cache: false,
        })
    }

    /// Full-recipe stage: a previously derived key plus one selected title.
    ///
    /// Depends on state left by the suggestions stage — a key without
    /// stored suggestions fails with a not-found error rather than silently
    /// regenerating them. The original preferences are reconstructed by
    /// decoding the key; no separately stored input field is consulted.
    pub async fn full_recipe(&self, cache_key: &str, selected_title: &str) -> Result<RecipeResponse> {
        if cache_key.is_empty() || selected_title.is_empty() {
            return Err(Error::Validation(ValidationError::without_path(
                "cacheKey and selectedTitle are required",
            )));
        }
        let key = CacheKey::from(cache_key);

        let record = self.cache.get(&key).await;
        if let Some(record) = &record {
            if let Some(recipe) = &record.full_recipe {
                tracing::debug!(key = key.as_str(), "full recipe served from cache");
                return Ok(RecipeResponse {
                    recipe: recipe.clone(),
                    from_cache: true,
                });
            }
        }
        match &record {
            Some(record) if record.suggestions.is_some() => {}
            _ => {
                return Err(Error::not_found(
                    "Recipe suggestions not found. Please generate suggestions first.",
                ))
            }
        }

        let input = key.decode()?;
        let output = self.provider.full_recipe(&input, selected_title).await?;
        let recipe = FullRecipe::from_value(&output)
            .map_err(|e| Error::generation(format!("provider returned invalid recipe: {}", e)))?;

        self.cache
            .set(&key, RecordPatch::full_recipe(recipe.clone()))
            .await?;
        tracing::debug!(
            provider = self.provider.name(),
            key = key.as_str(),
            "full recipe generated and cached"
        );

        Ok(RecipeResponse {
            recipe,
            from_cache: false,
        })
    }

    /// Full-recipe stage from a raw request body (`{cacheKey, selectedTitle}`).
    pub async fn full_recipe_from_value(&self, raw_request: &Value) -> Result<RecipeResponse> {
        let cache_key = raw_request
            .get("cacheKey")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let selected_title = raw_request
            .get("selectedTitle")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        self.full_recipe(cache_key, selected_title).await
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
