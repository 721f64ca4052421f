//! Container header records, read fresh from the live handle.
//!
//! Each expandable container shape has a fixed field-name contract with
//! the inspected program (the de facto wire format between the two):
//!
//! - growable array: `length`, `capacity`, `content`, `typename`
//! - byte/text buffer: `len`, optional `cap`, `content`
//! - integer slice: `n`, `content`
//! - grid: a row-count field, a column-count field, a row-pointer field
//!   (names vary per binding)
//!
//! `read` constructors tolerate absent fields and unreadable memory by
//! modeling every component as optional; callers decide how far they can
//! degrade. Records are never cached across requests.

use crate::core::address::Address;
use crate::core::layout::TypeLayout;
use crate::core::value::ValueHandle;
use crate::inspect::Inspect;

/// Pointee type name declared on a pointer member, if any.
fn pointee_name(member: &ValueHandle) -> Option<String> {
    match member.layout() {
        TypeLayout::Pointer { target, .. } => target.clone(),
        _ => None,
    }
}

/// Growable typed array header (`vec`).
#[derive(Debug, Clone)]
pub struct VecHeader {
    pub length: u64,
    pub capacity: Option<u64>,
    pub content: Option<Address>,
    /// Raw element-type tag read from inspected memory
    pub type_tag: Option<String>,
}

impl VecHeader {
    pub fn read(handle: &ValueHandle, ctx: &Inspect<'_>) -> Option<Self> {
        let length = handle.member("length").and_then(|m| ctx.read_unsigned(&m))?;
        let capacity = handle.member("capacity").and_then(|m| ctx.read_unsigned(&m));
        let content = handle.member("content").and_then(|m| ctx.read_pointer(&m));
        let type_tag = handle
            .member("typename")
            .and_then(|m| ctx.read_pointer(&m))
            .and_then(|addr| ctx.read_tag_string(addr));
        Some(Self {
            length,
            capacity,
            content,
            type_tag,
        })
    }
}

/// Length-prefixed byte/text buffer header (`string`, `u8_slice`).
#[derive(Debug, Clone)]
pub struct BufferHeader {
    pub len: u64,
    /// Absent on buffer variants without a capacity field
    pub cap: Option<u64>,
    pub content: Option<Address>,
}

impl BufferHeader {
    pub fn read(handle: &ValueHandle, ctx: &Inspect<'_>) -> Option<Self> {
        let len = handle.member("len").and_then(|m| ctx.read_unsigned(&m))?;
        let cap = handle.member("cap").and_then(|m| ctx.read_unsigned(&m));
        let content = handle.member("content").and_then(|m| ctx.read_pointer(&m));
        Some(Self { len, cap, content })
    }
}

/// Fixed-capacity integer slice header (`int_slice`).
#[derive(Debug, Clone)]
pub struct SliceHeader {
    pub n: u64,
    pub content: Option<Address>,
    /// Pointee type name of the content pointer, when declared
    pub elem_type: Option<String>,
}

impl SliceHeader {
    pub fn read(handle: &ValueHandle, ctx: &Inspect<'_>) -> Option<Self> {
        let n = handle.member("n").and_then(|m| ctx.read_unsigned(&m))?;
        let content_member = handle.member("content");
        let content = content_member.as_ref().and_then(|m| ctx.read_pointer(m));
        let elem_type = content_member.as_ref().and_then(pointee_name);
        Some(Self {
            n,
            content,
            elem_type,
        })
    }
}

/// Field names a grid binding reads its dimensions and rows through.
///
/// The screen layout names these `h`/`w`/`lines`; the multiplexer scene
/// names its dimensions `lines`/`columns` and has no expandable rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNames {
    pub rows: String,
    pub columns: String,
    /// Absent for summary-only grid shapes
    pub row_ptr: Option<String>,
}

impl Default for GridNames {
    fn default() -> Self {
        Self {
            rows: "h".into(),
            columns: "w".into(),
            row_ptr: Some("lines".into()),
        }
    }
}

impl GridNames {
    /// The multiplexer-scene variant: dimension fields only.
    pub fn summary_only(rows: &str, columns: &str) -> Self {
        Self {
            rows: rows.into(),
            columns: columns.into(),
            row_ptr: None,
        }
    }
}

/// Row/grid container header.
#[derive(Debug, Clone)]
pub struct GridHeader {
    pub rows: u64,
    pub columns: u64,
    pub row_ptr: Option<Address>,
    /// Pointee type name of the row pointer, when declared
    pub row_type: Option<String>,
}

impl GridHeader {
    pub fn read(handle: &ValueHandle, ctx: &Inspect<'_>, names: &GridNames) -> Option<Self> {
        let rows = handle
            .member(&names.rows)
            .and_then(|m| ctx.read_unsigned(&m))?;
        let columns = handle
            .member(&names.columns)
            .and_then(|m| ctx.read_unsigned(&m))?;
        let row_member = names.row_ptr.as_deref().and_then(|f| handle.member(f));
        let row_ptr = row_member.as_ref().and_then(|m| ctx.read_pointer(m));
        let row_type = row_member.as_ref().and_then(pointee_name);
        Some(Self {
            rows,
            columns,
            row_ptr,
            row_type,
        })
    }
}

/// Row-of-cells header (`screen_line`).
#[derive(Debug, Clone)]
pub struct LineHeader {
    pub eol: u64,
    pub cells: Option<Address>,
    /// Pointee type name of the cells pointer, when declared
    pub cell_type: Option<String>,
}

impl LineHeader {
    pub fn read(handle: &ValueHandle, ctx: &Inspect<'_>) -> Option<Self> {
        let eol = handle.member("eol").and_then(|m| ctx.read_unsigned(&m))?;
        let cells_member = handle.member("cells");
        let cells = cells_member.as_ref().and_then(|m| ctx.read_pointer(m));
        let cell_type = cells_member.as_ref().and_then(pointee_name);
        Some(Self {
            eol,
            cells,
            cell_type,
        })
    }
}
