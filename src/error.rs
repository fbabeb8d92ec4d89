//! Unified error type for the recipe pipeline.
//!
//! Taxonomy mirrors what callers need to distinguish at the request
//! boundary: malformed input or provider output ([`Error::Validation`]),
//! the recipe stage invoked before suggestions exist ([`Error::NotFound`]),
//! a failed or unparseable provider call ([`Error::Generation`]) and a
//! failed persistence write ([`Error::Storage`]). Storage read faults never
//! reach this type — the cache adapter swallows them as misses.

use thiserror::Error;

use crate::schema::ValidationError;

/// Unified error type for the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request input or malformed provider output. Never cached.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Full recipe requested for a key the suggestions stage never populated.
    #[error("{message}")]
    NotFound { message: String },

    /// Generation provider call failed or returned unusable content.
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Persistence write failed. Surfaced, unlike read faults.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Error::Generation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// HTTP status class for the transport layer sitting above the core.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound { .. } => 404,
            Error::Generation { .. } => 502,
            Error::Storage { .. } | Error::Serialization(_) => 500,
        }
    }

    /// The `{"error": "..."}` body every failure is reported as.
    ///
    /// Only the human-readable message crosses the boundary; no internal
    /// detail or backtrace leaks into the response.
    pub fn error_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}
