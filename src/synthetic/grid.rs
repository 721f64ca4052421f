//! Row/grid container provider.
//!
//! Passes every header field through unchanged except the raw row
//! pointer, which it replaces with one synthetic child: a bounded array
//! of exactly row-count row records reconstructed at the pointer's
//! address. This is the expansion that turns an untyped pointer-to-rows
//! into something the inspector can walk.

use tracing::debug;

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::guard::{is_safe_length, suspicious_label};
use crate::inspect::Inspect;
use crate::shapes::{GridHeader, GridNames};
use crate::synthetic::{Child, SyntheticChildren};
use crate::view::BoundedArrayView;

pub struct GridChildren {
    handle: ValueHandle,
    names: GridNames,
    children: Vec<Child>,
}

impl GridChildren {
    pub fn new(handle: ValueHandle, names: GridNames) -> Self {
        Self {
            handle,
            names,
            children: Vec::new(),
        }
    }
}

impl SyntheticChildren for GridChildren {
    fn update(&mut self, ctx: &Inspect<'_>) {
        self.children.clear();
        for member in self.handle.members() {
            if Some(member.name()) == self.names.row_ptr.as_deref() {
                continue;
            }
            self.children.push(Child::field(member));
        }
        let Some(row_field) = self.names.row_ptr.clone() else {
            return;
        };
        let Some(header) = GridHeader::read(&self.handle, ctx, &self.names) else {
            return;
        };
        if !is_safe_length(header.rows) {
            debug!(rows = header.rows, "refusing grid row expansion");
            self.children
                .push(Child::placeholder(row_field, suspicious_label(header.rows)));
            return;
        }
        let row_layout = header
            .row_type
            .as_deref()
            .and_then(|name| ctx.resolve(name))
            .unwrap_or_else(|| TypeLayout::opaque(1));
        let base = header.row_ptr.unwrap_or(Address::NULL);
        self.children.push(Child::elements(
            row_field,
            BoundedArrayView::new(base, row_layout, header.rows),
        ));
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<Child> {
        self.children.get(index).cloned()
    }

    fn child_index_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }
}
