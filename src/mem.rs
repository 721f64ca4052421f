//! Read-only access to the inspected process's memory.
//!
//! `ProcessMemory` is the seam between the engine and whatever actually
//! reaches into the inspected process (a live debug session, a core dump,
//! or a snapshot). Implementations must be deterministic and enforce
//! bounds so that garbage header fields can never fault the engine.

use crate::core::address::Address;

/// Errors that can occur during memory reads.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("read through null address")]
    NullAddress,
    #[error("address out of range: {0}")]
    OutOfRange(String),
    #[error("unreadable memory at {0}")]
    Unreadable(Address),
}

/// Byte order of the inspected process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// Decode up to 8 bytes as an unsigned integer in the given byte order.
pub fn decode_unsigned(bytes: &[u8], endian: Endianness) -> u64 {
    let mut value: u64 = 0;
    match endian {
        Endianness::Little => {
            for &b in bytes.iter().take(8).rev() {
                value = (value << 8) | u64::from(b);
            }
        }
        Endianness::Big => {
            for &b in bytes.iter().take(8) {
                value = (value << 8) | u64::from(b);
            }
        }
    }
    value
}

/// Bounded reads against the inspected process.
pub trait ProcessMemory {
    /// Read exactly `len` bytes starting at `addr`.
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Read at most `len` bytes; implementations may return fewer when the
    /// tail of the range is unmapped. The default requires the full range.
    fn read_upto(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.read_bytes(addr, len)
    }
}

/// A memory image captured from the inspected process: a base address plus
/// the bytes mapped there. Used by hosts that snapshot the target before
/// formatting, and by the test harness.
pub struct ImageMemory<'a> {
    base: Address,
    data: &'a [u8],
}

impl<'a> ImageMemory<'a> {
    pub fn new(base: Address, data: &'a [u8]) -> Self {
        Self { base, data }
    }

    /// Byte range `[start, start + len)` relative to the image base, if it
    /// lies fully inside the image.
    fn span(&self, addr: Address, len: usize) -> Result<(usize, usize), MemoryError> {
        if addr.is_null() {
            return Err(MemoryError::NullAddress);
        }
        let start = addr
            .value()
            .checked_sub(self.base.value())
            .ok_or_else(|| MemoryError::OutOfRange(format!("{} below image base", addr)))?
            as usize;
        let end = start.saturating_add(len);
        if start > self.data.len() || end > self.data.len() {
            return Err(MemoryError::OutOfRange(format!(
                "{:#x}..{:#x} not within [{}, {})",
                addr.value(),
                addr.value().saturating_add(len as u64),
                self.base,
                self.base.value() as usize + self.data.len(),
            )));
        }
        Ok((start, end))
    }
}

impl ProcessMemory for ImageMemory<'_> {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let (start, end) = self.span(addr, len)?;
        Ok(self.data[start..end].to_vec())
    }

    fn read_upto(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let (start, _) = self.span(addr, 0)?;
        let end = start.saturating_add(len).min(self.data.len());
        Ok(self.data[start..end].to_vec())
    }
}
