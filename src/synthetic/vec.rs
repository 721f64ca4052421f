//! Growable typed array provider.

use tracing::debug;

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::guard::{is_safe_length, suspicious_label};
use crate::inspect::Inspect;
use crate::shapes::VecHeader;
use crate::synthetic::{Child, SyntheticChildren};
use crate::view::BoundedArrayView;

/// Children of a growable typed array: the raw `length` and `capacity`
/// fields, then a synthetic `content` child holding `length` elements of
/// the header's runtime-resolved element type. An unresolvable type tag
/// degrades the elements to opaque single bytes.
pub struct VecChildren {
    handle: ValueHandle,
    children: Vec<Child>,
}

impl VecChildren {
    pub fn new(handle: ValueHandle) -> Self {
        Self {
            handle,
            children: Vec::new(),
        }
    }
}

impl SyntheticChildren for VecChildren {
    fn update(&mut self, ctx: &Inspect<'_>) {
        self.children.clear();
        let Some(header) = VecHeader::read(&self.handle, ctx) else {
            return;
        };
        if let Some(m) = self.handle.member("length") {
            self.children.push(Child::field(m));
        }
        if let Some(m) = self.handle.member("capacity") {
            self.children.push(Child::field(m));
        }
        if !is_safe_length(header.length) {
            debug!(length = header.length, "refusing vec content expansion");
            self.children
                .push(Child::placeholder("content", suspicious_label(header.length)));
            return;
        }
        let elem = header
            .type_tag
            .as_deref()
            .and_then(|tag| ctx.resolve(tag))
            .unwrap_or_else(|| TypeLayout::opaque(1));
        let base = header.content.unwrap_or(Address::NULL);
        self.children.push(Child::elements(
            "content",
            BoundedArrayView::new(base, elem, header.length),
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
