//! Fixed-capacity integer slice provider.
//!
//! Children are computed on demand rather than materialized: `[0]…[n-1]`
//! index straight into the content run, and one extra named child `n`
//! exposing the raw count field sits in the slot immediately after the
//! last element.

use tracing::debug;

use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::guard::is_safe_length;
use crate::inspect::Inspect;
use crate::shapes::SliceHeader;
use crate::synthetic::{Child, SyntheticChildren};
use crate::view::BoundedArrayView;

pub struct IntSliceChildren {
    handle: ValueHandle,
    length: u64,
    n_field: Option<ValueHandle>,
    view: Option<BoundedArrayView>,
}

impl IntSliceChildren {
    pub fn new(handle: ValueHandle) -> Self {
        Self {
            handle,
            length: 0,
            n_field: None,
            view: None,
        }
    }
}

impl SyntheticChildren for IntSliceChildren {
    fn update(&mut self, ctx: &Inspect<'_>) {
        self.length = 0;
        self.n_field = self.handle.member("n");
        self.view = None;
        let Some(header) = SliceHeader::read(&self.handle, ctx) else {
            return;
        };
        if !is_safe_length(header.n) {
            debug!(n = header.n, "refusing int-slice expansion");
            return;
        }
        self.length = header.n;
        let elem = header
            .elem_type
            .as_deref()
            .and_then(|name| ctx.resolve(name))
            .unwrap_or_else(|| TypeLayout::primitive("int32_t", 4));
        self.view = header
            .content
            .map(|base| BoundedArrayView::new(base, elem, header.n));
    }

    fn child_count(&self) -> usize {
        self.length as usize + usize::from(self.n_field.is_some())
    }

    fn child_at(&self, index: usize) -> Option<Child> {
        if (index as u64) < self.length {
            return self
                .view
                .as_ref()
                .and_then(|v| v.element(index as u64))
                .map(Child::field);
        }
        if index as u64 == self.length {
            return self.n_field.clone().map(Child::field);
        }
        None
    }

    fn child_index_of(&self, name: &str) -> Option<usize> {
        if name == "n" {
            return self.n_field.as_ref().map(|_| self.length as usize);
        }
        let index: u64 = name
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .ok()?;
        if index < self.length {
            Some(index as usize)
        } else {
            None
        }
    }
}
