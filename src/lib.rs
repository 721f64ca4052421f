//! Periscope: container introspection and pretty-printing for process
//! inspectors.
//!
//! Given a handle to a container header living in an inspected process's
//! memory (a growable array, a length-prefixed byte buffer, a row-major
//! screen grid, or one of their small value types), periscope
//! reconstructs bounded, indexable views over the elements and renders
//! one-line summaries — without the host inspector carrying built-in
//! knowledge of the container layouts, and without ever copying more
//! than a display's worth of the backing store.
//!
//! The engine is strictly read-only and presentation-oriented. It is
//! also total: garbage header fields, dangling pointers, and
//! uninitialized lengths degrade the rendered output (placeholders,
//! opaque fallbacks) and never surface as failures, because the host has
//! no graceful way to handle a crash in the middle of a display refresh.
//!
//! Entry points: [`registry::default_table`] for the standard bindings,
//! [`inspect::Inspect`] for the per-request context, and
//! [`types::TypeRegistry`] for describing the inspected program's types.

/// Core metadata types (addresses, layouts, value handles)
pub mod core;

pub mod error;
pub mod flags;
pub mod guard;
pub mod inspect;
pub mod logging;
pub mod mem;
pub mod registry;
pub mod sanitize;
pub mod shapes;
pub mod summary;
pub mod synthetic;
pub mod types;
pub mod view;

pub use error::{PeriscopeError, Result};
