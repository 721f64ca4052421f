//! In-memory layout descriptions for inspected types.
//!
//! A `TypeLayout` is the engine's picture of how a type is laid out in the
//! inspected process: enough to compute element strides and member offsets,
//! and nothing more. Layouts come out of a `types::TypeResolver`; when a
//! runtime type tag resolves to nothing, callers fall back to `Opaque`,
//! which treats elements as fixed-size blocks of raw bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named member of a struct layout, at a fixed byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Member name as the inspected program declares it
    pub name: String,
    /// Offset from the start of the struct in bytes
    pub offset: u64,
    /// Layout of the member itself
    pub layout: TypeLayout,
}

impl Field {
    pub fn new(name: impl Into<String>, offset: u64, layout: TypeLayout) -> Self {
        Self {
            name: name.into(),
            offset,
            layout,
        }
    }
}

/// Resolved in-memory shape of a type in the inspected process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeLayout {
    /// Fixed-width scalar (integers, chars, bools)
    Primitive { name: String, size: u64 },
    /// Pointer; `target` optionally names the pointee type for re-resolution
    Pointer { size: u64, target: Option<String> },
    /// Record with named members at fixed offsets
    Struct {
        name: String,
        size: u64,
        fields: Vec<Field>,
    },
    /// Contiguous run of `count` elements
    Array { elem: Box<TypeLayout>, count: u64 },
    /// Unresolved element type: fixed-size blocks of raw bytes
    Opaque { stride: u64 },
}

impl TypeLayout {
    pub fn primitive(name: impl Into<String>, size: u64) -> Self {
        TypeLayout::Primitive {
            name: name.into(),
            size,
        }
    }

    pub fn pointer(size: u64, target: Option<&str>) -> Self {
        TypeLayout::Pointer {
            size,
            target: target.map(str::to_string),
        }
    }

    pub fn array(elem: TypeLayout, count: u64) -> Self {
        TypeLayout::Array {
            elem: Box::new(elem),
            count,
        }
    }

    pub fn opaque(stride: u64) -> Self {
        TypeLayout::Opaque { stride }
    }

    /// Total size in bytes; for arrays this is `count * element size`
    /// (saturating, since counts come from inspected memory).
    pub fn size_bytes(&self) -> u64 {
        match self {
            TypeLayout::Primitive { size, .. } => *size,
            TypeLayout::Pointer { size, .. } => *size,
            TypeLayout::Struct { size, .. } => *size,
            TypeLayout::Array { elem, count } => elem.size_bytes().saturating_mul(*count),
            TypeLayout::Opaque { stride } => *stride,
        }
    }

    /// Declared name, where the layout carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeLayout::Primitive { name, .. } => Some(name),
            TypeLayout::Struct { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            TypeLayout::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeLayout::Primitive { name, .. } => write!(f, "{}", name),
            TypeLayout::Pointer { target, .. } => match target {
                Some(t) => write!(f, "{}*", t),
                None => write!(f, "void*"),
            },
            TypeLayout::Struct { name, .. } => write!(f, "{}", name),
            TypeLayout::Array { elem, count } => write!(f, "{}[{}]", elem, count),
            TypeLayout::Opaque { stride } => write!(f, "opaque({})", stride),
        }
    }
}
