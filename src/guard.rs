//! Suspicious-size gate for length-derived reconstruction.
//!
//! A length field the inspected process has not initialized yet reads as a
//! huge (or negative-as-unsigned) value; materializing a view of that many
//! elements would hang the host inspector. Every component consults this
//! gate before touching a length-derived size and substitutes the
//! placeholder label when it refuses.

/// Lengths at or above this are treated as uninitialized memory, not data.
pub const SUSPICIOUS_SIZE: u64 = 1 << 30;

/// True iff a reported length is plausible enough to materialize.
pub fn is_safe_length(n: u64) -> bool {
    n < SUSPICIOUS_SIZE
}

/// The placeholder substituted wherever a length fails the gate.
pub fn suspicious_label(n: u64) -> String {
    format!("<suspicious[{}]>", n)
}
