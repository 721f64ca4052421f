//! One-line container summaries.
//!
//! One formatter per container shape, each a total function from a live
//! handle to a display string. Summaries degrade — to a raw type tag, to
//! the suspicious placeholder, to `<unreadable>` — but never fail: the
//! host inspector has no graceful way to surface a crash mid-refresh.

use tracing::debug;

use crate::core::value::ValueHandle;
use crate::flags::CellAttributes;
use crate::guard::{is_safe_length, suspicious_label};
use crate::inspect::Inspect;
use crate::sanitize::sanitize;
use crate::shapes::{BufferHeader, GridHeader, GridNames, LineHeader, SliceHeader, VecHeader};
use crate::view::BoundedArrayView;

/// Fallback when a header cannot be read at all.
const UNREADABLE: &str = "<unreadable>";

/// True-color discriminant in the color header's `cmd` field.
const COLOR_RGB: u64 = 1;

fn decode_char(value: u64) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\u{fffd}')
}

/// Growable typed array: `<element-type>[<length>]`.
///
/// The element type is the header's runtime tag resolved against the type
/// registry; an unresolved tag is shown verbatim.
pub fn vec_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    let Some(header) = VecHeader::read(handle, ctx) else {
        return UNREADABLE.to_string();
    };
    let resolved = header
        .type_tag
        .as_deref()
        .and_then(|tag| ctx.resolve(tag))
        .and_then(|layout| layout.name().map(str::to_string));
    let elem = match (resolved, header.type_tag) {
        (Some(name), _) => name,
        (None, Some(tag)) => tag,
        (None, None) => "?".to_string(),
    };
    format!("{}[{}]", elem, header.length)
}

/// Length-prefixed text buffer: `string[<len>]`.
pub fn string_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    match BufferHeader::read(handle, ctx) {
        Some(header) => format!("string[{}]", header.len),
        None => UNREADABLE.to_string(),
    }
}

/// Byte-slice buffer: `u8[<len>] "<sanitized content>"`.
///
/// A length past the safety gate yields the suspicious placeholder and no
/// content read at all.
pub fn byte_slice_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    let Some(header) = BufferHeader::read(handle, ctx) else {
        return UNREADABLE.to_string();
    };
    if !is_safe_length(header.len) {
        debug!(len = header.len, "refusing byte-slice content read");
        return suspicious_label(header.len);
    }
    let bytes = header
        .content
        .filter(|addr| !addr.is_null())
        .and_then(|addr| ctx.read_bytes_at(addr, header.len as usize))
        .unwrap_or_default();
    format!("u8[{}] \"{}\"", header.len, sanitize(&bytes))
}

/// Fixed-capacity integer slice: `size=<n>`.
pub fn int_slice_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    match SliceHeader::read(handle, ctx) {
        Some(header) => format!("size={}", header.n),
        None => UNREADABLE.to_string(),
    }
}

/// Row/grid container: `<rows>x<columns>` straight from the header.
pub fn grid_summary(handle: &ValueHandle, ctx: &Inspect<'_>, names: &GridNames) -> String {
    match GridHeader::read(handle, ctx, names) {
        Some(header) => format!("{}x{}", header.rows, header.columns),
        None => UNREADABLE.to_string(),
    }
}

/// Unicode codepoint: the decoded character itself.
pub fn codepoint_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    match handle.member("value").and_then(|m| ctx.read_unsigned(&m)) {
        Some(value) => decode_char(value).to_string(),
        None => UNREADABLE.to_string(),
    }
}

/// Color: `#rrggbb` when the true-color discriminant is set, else the
/// palette index.
pub fn color_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    let Some(cmd) = handle.member("cmd").and_then(|m| ctx.read_unsigned(&m)) else {
        return UNREADABLE.to_string();
    };
    let read = |name: &str| {
        handle
            .member(name)
            .and_then(|m| ctx.read_unsigned(&m))
            .unwrap_or(0)
    };
    if cmd == COLOR_RGB {
        format!("#{:02x}{:02x}{:02x}", read("r"), read("g"), read("b"))
    } else {
        format!("{}", read("table"))
    }
}

/// Styled cell: the decoded character of its codepoint.
pub fn cell_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    match handle
        .member("cp")
        .and_then(|cp| cp.member("value"))
        .and_then(|m| ctx.read_unsigned(&m))
    {
        Some(value) => decode_char(value).to_string(),
        None => UNREADABLE.to_string(),
    }
}

/// Cell style: attribute flags plus nested fg/bg color summaries.
pub fn cell_style_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    let Some(attr) = handle.member("attr").and_then(|m| ctx.read_unsigned(&m)) else {
        return UNREADABLE.to_string();
    };
    let color = |name: &str| match handle.member(name) {
        Some(m) => color_summary(&m, ctx),
        None => UNREADABLE.to_string(),
    };
    format!(
        "{}, bg={}, fg={}",
        CellAttributes::describe(attr),
        color("bg"),
        color("fg"),
    )
}

/// Row of cells: `[n=<eol>]` followed by the decoded text of the first
/// `eol` cells.
pub fn line_summary(handle: &ValueHandle, ctx: &Inspect<'_>) -> String {
    let Some(header) = LineHeader::read(handle, ctx) else {
        return UNREADABLE.to_string();
    };
    if !is_safe_length(header.eol) {
        debug!(eol = header.eol, "refusing row-of-cells read");
        return suspicious_label(header.eol);
    }
    let mut out = format!("[n={}]", header.eol);
    let cell_layout = header
        .cell_type
        .as_deref()
        .and_then(|name| ctx.resolve(name));
    let (Some(cells), Some(cell_layout)) = (header.cells, cell_layout) else {
        return out;
    };
    let row = BoundedArrayView::new(cells, cell_layout, header.eol);
    for i in 0..row.len() {
        let value = row
            .element(i)
            .and_then(|cell| cell.member("cp"))
            .and_then(|cp| cp.member("value"))
            .and_then(|m| ctx.read_unsigned(&m));
        match value {
            Some(v) => out.push(decode_char(v)),
            None => out.push('\u{fffd}'),
        }
    }
    out
}
