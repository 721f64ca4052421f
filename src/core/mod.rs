//! Core metadata types for remote-container introspection.
//!
//! Everything here is a description of memory owned by the inspected
//! process: addresses, type layouts, and the value handles that pair the
//! two. None of these types perform reads themselves.

pub mod address;
pub mod layout;
pub mod value;

pub use address::Address;
pub use layout::{Field, TypeLayout};
pub use value::ValueHandle;
