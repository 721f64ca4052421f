//! Bounded, lazily-indexed views over element runs.
//!
//! A `BoundedArrayView` reconstructs a C-style array whose size is not
//! part of the pointer's static type: given a base address, an element
//! layout, and a count that already passed the safety gate, it exposes
//! index-checked element handles at `base + i * stride`. Nothing is read
//! or copied up front; each element handle is built on demand.

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;

/// An indexable run of `count` elements in the inspected process.
///
/// Callers gate `count` through `guard::is_safe_length` first; the view
/// itself only defends against null bases and zero strides, both of which
/// collapse it to zero elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedArrayView {
    base: Address,
    elem: TypeLayout,
    count: u64,
}

impl BoundedArrayView {
    pub fn new(base: Address, elem: TypeLayout, count: u64) -> Self {
        let count = if base.is_null() || elem.size_bytes() == 0 {
            0
        } else {
            count
        };
        Self { base, elem, count }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn elem_layout(&self) -> &TypeLayout {
        &self.elem
    }

    pub fn stride(&self) -> u64 {
        self.elem.size_bytes()
    }

    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Element `i`, named `[i]`, or `None` outside `0..len`.
    pub fn element(&self, index: u64) -> Option<ValueHandle> {
        if index >= self.count {
            return None;
        }
        let address = self.base.offset(index.checked_mul(self.stride())?)?;
        Some(ValueHandle::new(
            format!("[{}]", index),
            address,
            self.elem.clone(),
        ))
    }

    /// The whole view as a single array-typed handle, for presenting as
    /// one expandable child.
    pub fn handle(&self, name: impl Into<String>) -> ValueHandle {
        ValueHandle::new(
            name,
            self.base,
            TypeLayout::array(self.elem.clone(), self.count),
        )
    }
}
