//! Address type for locations in the inspected process.
//!
//! Every handle the engine hands out is anchored at an `Address`, a virtual
//! address in the inspected process's memory. The engine never dereferences
//! these itself; all reads go through `mem::ProcessMemory`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A virtual address in the inspected process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Address(pub u64);

impl Address {
    /// The null address. Views anchored here report zero elements.
    pub const NULL: Address = Address(0);

    pub fn new(value: u64) -> Self {
        Address(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Offset this address by `bytes`, or `None` on wrap-around.
    pub fn offset(&self, bytes: u64) -> Option<Address> {
        self.0.checked_add(bytes).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}
