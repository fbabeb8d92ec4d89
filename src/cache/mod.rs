//! Cache layer: key derivation, persistence seam and the record adapter.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheKey`] | Deterministic, decodable fingerprint of a validated input |
//! | [`DocumentStore`] | Trait for the black-box key-value persistence provider |
//! | [`MemoryStore`] | In-process reference backend |
//! | [`RecipeCache`] | Read-through / merge-write adapter owning record access |
//!
//! There is no eviction or expiry policy: entries persist until the backend
//! discards them.

mod backend;
mod key;
mod store;

pub use backend::{DocumentStore, MemoryStore};
pub use key::CacheKey;
pub use store::RecipeCache;
