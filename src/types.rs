//! Runtime type-name resolution.
//!
//! Container headers in the inspected process name their element types as
//! strings ("int32_t", "screen_cell", ...). `TypeResolver` turns such a
//! name into a `TypeLayout`, with an explicit not-found outcome; the
//! engine never guesses a layout. `TypeRegistry` is the shipped
//! implementation: a name-to-layout map pre-seeded with the C fixed-width
//! primitives and loadable from JSON, so a host can describe its target's
//! structs as data.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::layout::TypeLayout;
use crate::error::{PeriscopeError, Result};

/// Resolve a type name observed at runtime to its in-memory layout.
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Option<TypeLayout>;
}

/// Name-to-layout map describing the inspected program's types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeLayout>,
}

impl TypeRegistry {
    /// An empty registry. Most hosts want [`TypeRegistry::with_primitives`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the C fixed-width and common primitive
    /// type names.
    pub fn with_primitives() -> Self {
        let mut reg = Self::new();
        let prims: &[(&str, u64)] = &[
            ("int8_t", 1),
            ("int16_t", 2),
            ("int32_t", 4),
            ("int64_t", 8),
            ("uint8_t", 1),
            ("uint16_t", 2),
            ("uint32_t", 4),
            ("uint64_t", 8),
            ("char", 1),
            ("signed char", 1),
            ("unsigned char", 1),
            ("bool", 1),
            ("short", 2),
            ("unsigned short", 2),
            ("int", 4),
            ("unsigned", 4),
            ("unsigned int", 4),
            ("long long", 8),
            ("unsigned long long", 8),
            ("size_t", 8),
            ("ssize_t", 8),
        ];
        for (name, size) in prims {
            reg.insert(*name, TypeLayout::primitive(*name, *size));
        }
        reg
    }

    pub fn insert(&mut self, name: impl Into<String>, layout: TypeLayout) {
        self.types.insert(name.into(), layout);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Parse a registry from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PeriscopeError::from)
    }

    /// Load a registry from a JSON file on the host side.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(PeriscopeError::from)
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<TypeLayout> {
        self.types.get(name).cloned()
    }
}
