//! Cell attribute flags as stored by the inspected terminal program.
//!
//! Bit assignments follow the target's screen header (SGR 1..9 in the low
//! bits, underline variants and SGR 51..53 above).

use bitflags::bitflags;

bitflags! {
    /// Styled-cell attribute bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellAttributes: u16 {
        const BOLD = 1 << 0;
        const FAINT = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK_SLOW = 1 << 4;
        const BLINK_RAPID = 1 << 5;
        const REVERSE = 1 << 6;
        const CONCEAL = 1 << 7;
        const CROSSED_OUT = 1 << 8;
        const UNDERLINE_DOUBLE = 1 << 9;
        const UNDERLINE_CURLY = 1 << 10;
        const UNDERLINE_DOTTED = 1 << 11;
        const UNDERLINE_DASHED = 1 << 12;
        const FRAMED = 1 << 13;
        const ENCIRCLED = 1 << 14;
        const OVERLINED = 1 << 15;
    }
}

impl CellAttributes {
    /// Symbolic rendering for summaries: `BOLD|UNDERLINE`, or `NONE`.
    /// Bits outside the known set are dropped rather than invented.
    pub fn describe(raw: u64) -> String {
        let attrs = CellAttributes::from_bits_truncate(raw as u16);
        if attrs.is_empty() {
            return "NONE".to_string();
        }
        attrs
            .iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join("|")
    }
}
