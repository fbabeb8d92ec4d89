//! Persistence provider seam and reference backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::Error;
use crate::Result;

/// Black-box key-value persistence provider.
///
/// One JSON document per key in a flat namespace. Retention is the
/// backend's concern; the core never deletes entries. Implementations map
/// their own failures to [`Error::Storage`] — the cache adapter decides
/// which of those surface to callers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, document: Value) -> Result<()>;
    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// In-memory document store.
///
/// Reference backend for tests and single-process deployments. Entries
/// persist for the process lifetime; there is no eviction, matching the
/// no-expiry cache policy.
#[derive(Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::storage("document store lock poisoned"))?;
        Ok(documents.get(key).cloned())
    }

    async fn set(&self, key: &str, document: Value) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| Error::storage("document store lock poisoned"))?;
        documents.insert(key.to_string(), document);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
