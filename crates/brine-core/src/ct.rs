//! Constant-time comparison for tags and MACs.

use subtle::ConstantTimeEq;

/// Returns `true` iff `a` and `b` have the same length and contents.
///
/// Only the length check may branch; the content comparison takes the same
/// time wherever the first differing byte is. Use this for every comparison
/// against an attacker-supplied tag.
pub fn is_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
