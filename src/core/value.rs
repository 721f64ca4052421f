//! Value handles: named, typed locations in the inspected process.
//!
//! A `ValueHandle` is pure metadata (name, address, layout); it owns no
//! bytes and stays valid only as long as the inspected process has not
//! reused the memory behind it. Reads happen through `inspect::Inspect`,
//! fresh on every request.

use serde::{Deserialize, Serialize};

use crate::core::address::Address;
use crate::core::layout::TypeLayout;

/// A read-only view onto one value in the inspected process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueHandle {
    name: String,
    address: Address,
    layout: TypeLayout,
}

impl ValueHandle {
    pub fn new(name: impl Into<String>, address: Address, layout: TypeLayout) -> Self {
        Self {
            name: name.into(),
            address,
            layout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn layout(&self) -> &TypeLayout {
        &self.layout
    }

    /// Resolve a struct member by name. Absent members and non-struct
    /// layouts yield `None`, never a fault.
    pub fn member(&self, name: &str) -> Option<ValueHandle> {
        let field = self.layout.field(name)?;
        let address = self.address.offset(field.offset)?;
        Some(ValueHandle::new(&field.name, address, field.layout.clone()))
    }

    /// Member handles in declaration order, for struct layouts.
    pub fn members(&self) -> Vec<ValueHandle> {
        self.layout
            .fields()
            .iter()
            .filter_map(|f| {
                let address = self.address.offset(f.offset)?;
                Some(ValueHandle::new(&f.name, address, f.layout.clone()))
            })
            .collect()
    }

    /// Index into an array layout: element `i` at `address + i * stride`.
    pub fn element(&self, index: u64) -> Option<ValueHandle> {
        match &self.layout {
            TypeLayout::Array { elem, count } if index < *count => {
                let stride = elem.size_bytes();
                let address = self.address.offset(index.checked_mul(stride)?)?;
                Some(ValueHandle::new(
                    format!("[{}]", index),
                    address,
                    (**elem).clone(),
                ))
            }
            _ => None,
        }
    }
}
