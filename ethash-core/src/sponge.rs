//! The Keccak capability the pipeline consumes but does not implement.
//!
//! Rate, padding, and the permutation itself are unspecified here; any
//! conformant Keccak implementation (see the sibling `ethash-keccak`
//! crate for one backed by `sha3`) satisfies this trait. Both methods
//! take and return owned little-endian word arrays rather than an
//! overlapping in/out buffer pair, since that makes the "must tolerate
//! overlap" requirement of the source API vacuous.
pub trait KeccakSponge {
    /// Keccak-256 over `input`, squeezed to 8 little-endian words (32 bytes).
    fn keccak256(&self, input: &[u32]) -> [u32; 8];

    /// Keccak-512 over `input`, squeezed to 16 little-endian words (64 bytes).
    fn keccak512(&self, input: &[u32]) -> [u32; 16];
}
