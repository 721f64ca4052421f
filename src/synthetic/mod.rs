//! Synthetic child providers for expandable container shapes.
//!
//! A provider exposes a stable, queryable child list over one container
//! instance so the host inspector can let a user drill into elements.
//! The lifecycle is uninitialized → updated → queryable: `update`
//! re-reads every header field from the live handle and fully replaces
//! any previously built children, so a query never reflects state older
//! than the last refresh. Out-of-range indexes and unknown names are not
//! errors; they resolve to `None`.

mod buffer;
mod grid;
mod intslice;
mod vec;

pub use buffer::BufferChildren;
pub use grid::GridChildren;
pub use intslice::IntSliceChildren;
pub use vec::VecChildren;

use crate::core::value::ValueHandle;
use crate::inspect::Inspect;
use crate::view::BoundedArrayView;

/// One entry in a provider's child list.
#[derive(Debug, Clone)]
pub struct Child {
    name: String,
    kind: ChildKind,
}

/// What a child resolves to when the inspector drills into it.
#[derive(Debug, Clone)]
pub enum ChildKind {
    /// A header field passed through unchanged
    Value(ValueHandle),
    /// A reconstructed element run
    Elements(BoundedArrayView),
    /// Display text standing in for content that was refused or absent
    Placeholder(String),
}

impl Child {
    pub(crate) fn field(handle: ValueHandle) -> Self {
        Self {
            name: handle.name().to_string(),
            kind: ChildKind::Value(handle),
        }
    }

    pub(crate) fn elements(name: impl Into<String>, view: BoundedArrayView) -> Self {
        Self {
            name: name.into(),
            kind: ChildKind::Elements(view),
        }
    }

    pub(crate) fn placeholder(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ChildKind::Placeholder(text.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ChildKind {
        &self.kind
    }
}

/// The child-provider contract every expandable shape implements.
pub trait SyntheticChildren {
    /// Re-read all header fields from the live handle and rebuild the
    /// child list. Must be called before any query; idempotent.
    fn update(&mut self, ctx: &Inspect<'_>);

    fn child_count(&self) -> usize;

    /// Child at `index`, or `None` outside `0..child_count()`.
    fn child_at(&self, index: usize) -> Option<Child>;

    /// Index for a child name, or `None` for names outside the known set.
    fn child_index_of(&self, name: &str) -> Option<usize>;

    fn has_children(&self) -> bool {
        true
    }
}
