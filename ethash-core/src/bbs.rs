//! A Blum-Blum-Shub word stream: `n -> n^3 mod P`, seekable via
//! `n -> n^(3^i) mod P` for random access without replaying every step.

use crate::modarith::{mod_mul32, mod_pow32};

/// One BBS step: `n^3 mod P`.
#[inline]
pub fn step(n: u32, p: u32) -> u32 {
    mod_mul32(mod_mul32(n, n, p), n, p)
}

/// `i` BBS steps from `n` in O(log^2 i), without iterating. `i` is a
/// full `u64` (a node index can range over `dagSize/64`, which is not
/// bounded to 32 bits) — callers must not narrow it before calling in.
///
/// `n^(3^i) mod P = n^(3^i mod (P-1)) mod P` by Fermat's little theorem
/// (`P` prime), so the exponent itself is reduced mod `P - 1` first.
pub fn advance(n: u32, i: u64, p: u32) -> u32 {
    let e = mod_pow32(3, i, p - 1);
    mod_pow32(n, e.into(), p)
}

/// Coerces `n` into the BBS-safe range `[2, P-2]`.
#[inline]
pub fn clamp(n: u32, p: u32) -> u32 {
    if n < 2 {
        2
    } else if n > p - 2 {
        p - 2
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modarith::{P1, P2};

    #[test]
    fn advance_matches_repeated_step() {
        let mut n = clamp(123_456_789, P2);
        for i in 0..20u64 {
            assert_eq!(advance(clamp(123_456_789, P2), i, P2), n, "mismatch at i={i}");
            n = step(n, P2);
        }
    }

    #[test]
    fn advance_zero_steps_is_identity() {
        let n = clamp(42, P1);
        assert_eq!(advance(n, 0, P1), n);
    }

    #[test]
    fn advance_accepts_index_beyond_u32() {
        // advance(n, a+b, P) == advance(advance(n, a, P), b, P), since both
        // sides compute n^(3^(a+b)) mod P. Pick a, b so a+b overflows u32
        // but neither addend does, to pin down that the *sum* is carried
        // through as a full u64 rather than wrapping.
        let n = clamp(123_456_789, P1);
        let a: u64 = u32::MAX as u64;
        let b: u64 = 12345;
        assert_eq!(advance(n, a + b, P1), advance(advance(n, a, P1), b, P1));
    }

    #[test]
    fn clamp_boundaries() {
        assert_eq!(clamp(0, P1), 2);
        assert_eq!(clamp(1, P1), 2);
        assert_eq!(clamp(2, P1), 2);
        assert_eq!(clamp(P1 - 2, P1), P1 - 2);
        assert_eq!(clamp(P1 - 1, P1), P1 - 2);
        assert_eq!(clamp(P1, P1), P1 - 2);
    }
}
