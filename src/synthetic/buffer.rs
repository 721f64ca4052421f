//! Length-prefixed byte/text buffer provider.
//!
//! Serves both buffer variants: the heap string (`len`, `cap`, `content`)
//! and the borrowed byte slice (`len`, `content`). The capacity child is
//! simply omitted when the layout has no such field.

use tracing::debug;

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::guard::{is_safe_length, suspicious_label};
use crate::inspect::Inspect;
use crate::shapes::BufferHeader;
use crate::synthetic::{Child, SyntheticChildren};
use crate::view::BoundedArrayView;

pub struct BufferChildren {
    handle: ValueHandle,
    children: Vec<Child>,
}

impl BufferChildren {
    pub fn new(handle: ValueHandle) -> Self {
        Self {
            handle,
            children: Vec::new(),
        }
    }
}

impl SyntheticChildren for BufferChildren {
    fn update(&mut self, ctx: &Inspect<'_>) {
        self.children.clear();
        let Some(header) = BufferHeader::read(&self.handle, ctx) else {
            return;
        };
        if !is_safe_length(header.len) {
            debug!(len = header.len, "refusing buffer content expansion");
            self.children
                .push(Child::placeholder("content", suspicious_label(header.len)));
            return;
        }
        if let Some(m) = self.handle.member("len") {
            self.children.push(Child::field(m));
        }
        if let Some(m) = self.handle.member("cap") {
            self.children.push(Child::field(m));
        }
        let base = header.content.unwrap_or(Address::NULL);
        self.children.push(Child::elements(
            format!("u8[{}]", header.len),
            BoundedArrayView::new(base, TypeLayout::primitive("uint8_t", 1), header.len),
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
