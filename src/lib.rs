//! # souschef
//!
//! Two-stage AI recipe generation core: user preferences become three
//! recipe suggestions, a selected suggestion becomes a full recipe, and
//! both stages sit behind a read-through cache so identical requests never
//! pay for generation twice.
//!
//! ## Overview
//!
//! The pipeline is: validated input → deterministic cache key → cache
//! lookup → (hit: stored value) | (miss: generation provider → validated
//! output → merge-write persist). The full-recipe stage depends on the
//! record left by the suggestions stage and reconstructs the original
//! preferences by decoding the cache key — the key is a reversible
//! canonical-JSON/base64 transform, not a hash.
//!
//! The HTTP transport and the concrete backends stay outside the crate:
//! the generation model is reached through the [`provider::GenerationProvider`]
//! trait (a Gemini driver ships as the reference implementation) and
//! persistence through the [`cache::DocumentStore`] trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use souschef::{GeminiProvider, MemoryStore, RecipeEngine};
//!
//! #[tokio::main]
//! async fn main() -> souschef::Result<()> {
//!     let engine = RecipeEngine::new(
//!         Arc::new(GeminiProvider::from_env()?),
//!         Arc::new(MemoryStore::new()),
//!     );
//!
//!     let body = serde_json::json!({
//!         "ingredients": ["egg", "flour"],
//!         "dishType": "dessert",
//!         "taste": "sweet",
//!         "cookingTime": "30-minutes"
//!     });
//!     let suggested = engine.suggest(&body).await?;
//!     let recipe = engine
//!         .full_recipe(&suggested.cache_key, &suggested.suggestions[0].title)
//!         .await?;
//!     println!("{}", recipe.recipe.title);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Parse-and-validate boundaries for every payload shape |
//! | [`cache`] | Key derivation, persistence seam, merge-write adapter |
//! | [`provider`] | Generation provider trait and Gemini driver |
//! | [`engine`] | Two-stage orchestrator |
//! | [`config`] | Provider configuration |

pub mod cache;
pub mod config;
pub mod engine;
pub mod provider;
pub mod schema;

// Re-export main types for convenience
pub use cache::{CacheKey, DocumentStore, MemoryStore, RecipeCache};
pub use config::GeminiConfig;
pub use engine::{RecipeEngine, RecipeResponse, SuggestionsResponse};
pub use provider::{GeminiProvider, GenerationProvider};
pub use schema::{
    CachedRecord, FormInput, FullRecipe, RecipeIdea, RecipeIngredient, RecordPatch,
    SuggestionList, ValidationError,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

/// Initialize a `tracing` subscriber honoring `RUST_LOG`.
///
/// For binaries and tests; the library itself only emits events.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
