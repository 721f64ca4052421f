//! Display-safe rendering of raw bytes from the inspected process.
//!
//! Buffers under inspection routinely hold terminal control bytes, stale
//! escape sequences, and high-bit garbage. `sanitize` turns any byte run
//! into printable text: control bytes become caret notation, high bytes
//! become hex escapes, long space runs collapse, and escape-introduced
//! sequences are labeled `CSI`/`OSC`/`ESC`. Total and deterministic.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(" {5,}").expect("valid space-run regex"));

/// Render a raw byte buffer as display-safe text.
///
/// The control-byte substitution step is idempotent on its own output: it
/// emits no raw control bytes except ESC, which the labeling step then
/// consumes.
pub fn sanitize(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            // held for the sequence-labeling step
            0x1b => out.push('\x1b'),
            0x0d => out.push_str("\\r"),
            0x0a => out.push_str("\\n"),
            0x09 => out.push_str("\\t"),
            0x08 => out.push_str("<BS>"),
            0x7f => out.push_str("<DEL>"),
            0x00..=0x1f => {
                out.push('^');
                out.push(char::from(b + 64));
            }
            0x80..=0xff => {
                out.push_str(&format!("\\x{:02x}", b));
            }
            _ => out.push(char::from(b)),
        }
    }

    let out = SPACE_RUN.replace_all(&out, |caps: &Captures<'_>| {
        format!("<spaces:{}>", caps[0].len())
    });
    let out = out.replace(' ', "\u{2420}");

    out.replace("\x1b[", " CSI ")
        .replace("\x1b]", " OSC ")
        .replace('\x1b', " ESC ")
        .trim()
        .to_string()
}
