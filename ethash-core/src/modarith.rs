//! 32-bit modular multiply and exponentiation over the BBS primes.
//!
//! The source this algorithm is ported from runs on floating-point
//! integers and splits multiplications to stay within 53 exact bits.
//! Rust has native 64-bit multiplication, so `mod_mul32` widens to `u64`
//! directly instead of porting the split-multiplication recipe.

/// Modulus used for the `rand1` BBS stream (cache-seed residue).
pub const P1: u32 = 4_294_967_087;

/// Modulus used for the `rand2` BBS stream (per-node / per-iteration residue).
pub const P2: u32 = 4_294_963_787;

/// `(a * b) mod m` without overflow.
#[inline]
pub fn mod_mul32(a: u32, b: u32, m: u32) -> u32 {
    ((a as u64 * b as u64) % m as u64) as u32
}

/// `(b^e) mod m` via left-to-right square-and-multiply. `exp` is a full
/// `u64` so callers deriving the exponent from a node index (up to
/// `dagSize/64`, per spec) never have to narrow it first.
pub fn mod_pow32(base: u32, exp: u64, m: u32) -> u32 {
    let mut r: u32 = 1;
    let mut seen_bit = false;
    for i in (0..64).rev() {
        if seen_bit {
            r = mod_mul32(r, r, m);
        }
        if (exp >> i) & 1 == 1 {
            r = mod_mul32(r, base, m);
            seen_bit = true;
        }
    }
    r
}

/// `((2^32 * hi) mod n + lo) mod n`, treating `(lo, hi)` as a 64-bit
/// unsigned value split across two 32-bit words.
#[inline]
pub fn mod64(lo: u32, hi: u32, n: usize) -> usize {
    let n = n as u128;
    let wide = ((hi as u128) << 32) % n;
    ((wide + lo as u128) % n) as usize
}

/// `v mod n`, lifted to `usize` for indexing. When `n` is a power of two
/// (always true for `dagPageCount`, per §3) this is exact and the
/// optimizer folds it to an AND mask; `cacheNodeCount` need not be a
/// power of two, so this stays a true modulo rather than a bitmask.
#[inline]
pub fn mod32(v: u32, n: usize) -> usize {
    (v as usize) % n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_mul_matches_naive_for_small_values() {
        assert_eq!(mod_mul32(7, 6, 41), 42 % 41);
        assert_eq!(mod_mul32(0, 123, 17), 0);
    }

    #[test]
    fn mod_mul_handles_near_u32_max_operands() {
        let a = P1 - 1;
        let b = P1 - 2;
        let expected = ((a as u64) * (b as u64)) % (P1 as u64);
        assert_eq!(mod_mul32(a, b, P1), expected as u32);
    }

    #[test]
    fn mod_pow_zero_exponent_is_one() {
        assert_eq!(mod_pow32(12345, 0, P2), 1 % P2);
    }

    #[test]
    fn mod_pow_one_exponent_is_identity() {
        assert_eq!(mod_pow32(12345, 1, P2), 12345 % P2);
    }

    #[test]
    fn mod_pow_matches_repeated_squaring() {
        let base = 9973u32;
        let mut expected = 1u64;
        for _ in 0..13 {
            expected = (expected * base as u64) % P1 as u64;
        }
        assert_eq!(mod_pow32(base, 13, P1), expected as u32);
    }

    #[test]
    fn mod_pow_accepts_exponents_beyond_u32() {
        // Exponent well past u32::MAX must not get silently truncated by
        // the caller; mod_pow32 itself takes the full u64 and should
        // agree with Fermat-reducing the exponent mod (P1 - 1) first.
        let big_exp = (u32::MAX as u64) + 1_000_000;
        let reduced = big_exp % (P1 as u64 - 1);
        assert_eq!(mod_pow32(7, big_exp, P1), mod_pow32(7, reduced, P1));
    }

    #[test]
    fn mod64_boundary_cases() {
        assert_eq!(mod64(17, 0, 100), 17);
        assert_eq!(mod64(0, 1, 100), (1u128 << 32) as usize % 100);
    }

    #[test]
    fn mod32_wraps_into_range() {
        assert_eq!(mod32(0, 16), 0);
        assert_eq!(mod32(31, 16), 15);
        assert_eq!(mod32(u32::MAX, 16), (u32::MAX as usize) % 16);
    }
}
