//! Error types for the periscope introspection engine.
//!
//! Formatter and provider entry points are total and never surface these;
//! the fallible API is the host-facing configuration side (registration,
//! registry loading) plus the typed read seams.

use thiserror::Error;

use crate::mem::MemoryError;
use crate::registry::RegistryError;

/// Main error type for periscope operations.
#[derive(Debug, Error)]
pub enum PeriscopeError {
    /// Memory read failures surfaced by `ProcessMemory` implementations
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    /// Formatter registration failures
    #[error("registration error: {0}")]
    Registry(#[from] RegistryError),

    /// File I/O errors (registry loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PeriscopeError {
    fn from(err: serde_json::Error) -> Self {
        PeriscopeError::Serialization(err.to_string())
    }
}

/// Result type alias for periscope operations
pub type Result<T> = std::result::Result<T, PeriscopeError>;
