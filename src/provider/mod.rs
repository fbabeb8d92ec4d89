//! Generation provider seam.
//!
//! The provider is a black box that turns validated preferences into JSON
//! content. Its output is untrusted: implementations return raw
//! [`serde_json::Value`] and the orchestrator re-validates it against the
//! expected schema on every call before anything is persisted.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::FormInput;
use crate::Result;

/// Black-box generative model producing recipe content.
///
/// Failures map to [`crate::Error::Generation`]; the core performs no
/// retries — resubmission is the caller's decision.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// First stage: exactly three title/description pairs for the input.
    async fn suggest(&self, input: &FormInput) -> Result<Value>;

    /// Second stage: the full structured recipe for one selected title.
    async fn full_recipe(&self, input: &FormInput, selected_title: &str) -> Result<Value>;

    /// Provider name for logs.
    fn name(&self) -> &'static str;
}
