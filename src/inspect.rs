//! Per-request inspection context.
//!
//! An `Inspect` bundles the three things a formatter or provider needs to
//! interpret a handle: the inspected process's memory, a type resolver,
//! and the target byte order. One is created per inspector request and
//! discarded at its end; nothing read through it is cached across
//! requests, so a refresh can never show stale container state.
//!
//! All read helpers model failure as absence. A garbage pointer or a
//! truncated image degrades the display, never the host inspector.

use tracing::trace;

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::mem::{decode_unsigned, Endianness, ProcessMemory};
use crate::types::TypeResolver;

/// Longest type-tag string read back from the inspected process.
const MAX_TAG_BYTES: usize = 255;

/// Everything needed to interpret handles during one inspector request.
pub struct Inspect<'a> {
    mem: &'a dyn ProcessMemory,
    types: &'a dyn TypeResolver,
    endianness: Endianness,
}

impl<'a> Inspect<'a> {
    pub fn new(mem: &'a dyn ProcessMemory, types: &'a dyn TypeResolver) -> Self {
        Self {
            mem,
            types,
            endianness: Endianness::default(),
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn resolve(&self, name: &str) -> Option<TypeLayout> {
        self.types.resolve(name)
    }

    /// Read exactly `len` bytes at `addr`; `None` on any failure.
    pub fn read_bytes_at(&self, addr: Address, len: usize) -> Option<Vec<u8>> {
        match self.mem.read_bytes(addr, len) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                trace!(%addr, len, %err, "memory read failed");
                None
            }
        }
    }

    /// Read the handle's value as an unsigned integer of its layout width
    /// (clamped to 8 bytes).
    pub fn read_unsigned(&self, handle: &ValueHandle) -> Option<u64> {
        let width = handle.layout().size_bytes().min(8) as usize;
        if width == 0 {
            return None;
        }
        let bytes = self.read_bytes_at(handle.address(), width)?;
        Some(decode_unsigned(&bytes, self.endianness))
    }

    /// Read the handle's value as a pointer into the inspected process.
    pub fn read_pointer(&self, handle: &ValueHandle) -> Option<Address> {
        self.read_unsigned(handle).map(Address::new)
    }

    /// Read a NUL-terminated tag string at `addr`, capped at 255 bytes.
    /// Unterminated reads use whatever printable prefix is available.
    pub fn read_tag_string(&self, addr: Address) -> Option<String> {
        if addr.is_null() {
            return None;
        }
        let bytes = match self.mem.read_upto(addr, MAX_TAG_BYTES) {
            Ok(bytes) => bytes,
            Err(err) => {
                trace!(%addr, %err, "tag string read failed");
                return None;
            }
        };
        let end = memchr::memchr(0, &bytes).unwrap_or(bytes.len());
        if end == 0 {
            return None;
        }
        Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Field;
    use crate::mem::ImageMemory;
    use crate::types::TypeRegistry;

    #[test]
    fn read_unsigned_uses_layout_width() {
        let data = [0x2a, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff];
        let mem = ImageMemory::new(Address::new(0x1000), &data);
        let reg = TypeRegistry::with_primitives();
        let ctx = Inspect::new(&mem, &reg);

        let h = ValueHandle::new(
            "n",
            Address::new(0x1000),
            TypeLayout::primitive("uint32_t", 4),
        );
        assert_eq!(ctx.read_unsigned(&h), Some(42));

        // the same address with a wider layout picks up the garbage tail
        let wide = ValueHandle::new(
            "n",
            Address::new(0x1000),
            TypeLayout::primitive("uint64_t", 8),
        );
        assert_eq!(ctx.read_unsigned(&wide), Some(0xffff_ffff_0000_002a));
    }

    #[test]
    fn read_unsigned_absent_on_bad_address() {
        let data = [0u8; 4];
        let mem = ImageMemory::new(Address::new(0x1000), &data);
        let reg = TypeRegistry::with_primitives();
        let ctx = Inspect::new(&mem, &reg);
        let h = ValueHandle::new(
            "n",
            Address::new(0x9000),
            TypeLayout::primitive("uint32_t", 4),
        );
        assert_eq!(ctx.read_unsigned(&h), None);
    }

    #[test]
    fn tag_string_stops_at_nul() {
        let data = b"int32_t\0garbage";
        let mem = ImageMemory::new(Address::new(0x1000), data);
        let reg = TypeRegistry::with_primitives();
        let ctx = Inspect::new(&mem, &reg);
        assert_eq!(
            ctx.read_tag_string(Address::new(0x1000)).as_deref(),
            Some("int32_t")
        );
        assert_eq!(ctx.read_tag_string(Address::NULL), None);
    }

    #[test]
    fn tag_string_survives_missing_terminator() {
        // tag runs to the end of the image with no NUL
        let data = b"cell";
        let mem = ImageMemory::new(Address::new(0x1000), data);
        let reg = TypeRegistry::with_primitives();
        let ctx = Inspect::new(&mem, &reg);
        assert_eq!(
            ctx.read_tag_string(Address::new(0x1000)).as_deref(),
            Some("cell")
        );
    }

    #[test]
    fn member_reads_compose() {
        // struct { uint32_t value; } at 0x1000 with value = 0x1F600
        let data = 0x1f600u32.to_le_bytes();
        let mem = ImageMemory::new(Address::new(0x1000), &data);
        let reg = TypeRegistry::with_primitives();
        let ctx = Inspect::new(&mem, &reg);
        let cp = ValueHandle::new(
            "cp",
            Address::new(0x1000),
            TypeLayout::Struct {
                name: "codepoint".into(),
                size: 4,
                fields: vec![Field::new("value", 0, TypeLayout::primitive("uint32_t", 4))],
            },
        );
        let value = cp.member("value").expect("value member");
        assert_eq!(ctx.read_unsigned(&value), Some(0x1f600));
    }
}
