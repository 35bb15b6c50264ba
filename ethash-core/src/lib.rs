//! Core of an Ethash-style proof-of-work evaluator: seed-to-cache
//! expansion, on-demand DAG-node derivation, and the memory-hard mix
//! pipeline that turns `(header, nonce)` into a 32-byte digest.
//!
//! The Keccak-f[1600] sponge is an external collaborator, consumed
//! through the [`KeccakSponge`] trait rather than implemented here (see
//! the sibling `ethash-keccak` crate for a concrete, `sha3`-backed
//! implementation).

pub mod bbs;
pub mod cache;
pub mod dag;
mod error;
pub mod fnv;
mod hash;
pub mod modarith;
pub mod params;
pub mod sponge;

pub use cache::Cache;
pub use error::EthashError;
pub use params::Params;
pub use sponge::KeccakSponge;

use cache::pack_seed_words;

/// An immutable `(params, seed)`-derived evaluator. Build once via
/// [`Evaluator::setup`], then call [`Evaluator::hash`] for every
/// `(header, nonce)` pair; `cache` and `rand1` never change afterward,
/// so one evaluator is safely shared read-only across threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    params: Params,
    cache: Cache,
    rand1: u32,
}

impl Evaluator {
    /// Packs `seed` into words, builds the cache (Phase A + `cacheRounds`
    /// passes of RandMemoHash), and derives `rand1` from `cache[0]`.
    pub fn setup(
        params: Params,
        seed: &[u8],
        sponge: &impl KeccakSponge,
    ) -> Result<Self, EthashError> {
        params.validate()?;
        let seed_words = pack_seed_words(seed)?;
        let cache = Cache::build(&params, &seed_words, sponge);
        let rand1 = cache.rand1();
        Ok(Evaluator {
            params,
            cache,
            rand1,
        })
    }

    /// Computes the 32-byte digest for `(header, nonce)`.
    pub fn hash(&self, header: &[u8; 32], nonce: &[u8; 8], sponge: &impl KeccakSponge) -> [u8; 32] {
        let mut hn = [0u32; 16];
        for (i, chunk) in header.chunks_exact(4).enumerate() {
            hn[i] = u32::from_le_bytes(chunk.try_into().unwrap());
        }
        hn[8] = u32::from_le_bytes(nonce[0..4].try_into().unwrap());
        hn[9] = u32::from_le_bytes(nonce[4..8].try_into().unwrap());
        // words [10, 16) stay zero: the pad region, zeroed fresh per call.

        let digest = hash::hash(&self.params, &self.cache, self.rand1, &hn, sponge);
        words_to_bytes32(&digest)
    }

    /// Keccak-256 over the cache's full byte image, for diagnostic
    /// equivalence checks between two independently built caches.
    pub fn cache_digest(&self, sponge: &impl KeccakSponge) -> [u8; 32] {
        words_to_bytes32(&self.cache.digest(sponge))
    }

    /// The evaluator's immutable parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The evaluator's immutable cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The seed residue derived once at setup, `clamp(cache[0], P1)`.
    pub fn rand1(&self) -> u32 {
        self.rand1
    }
}

fn words_to_bytes32(words: &[u32; 8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, w) in words.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(&w.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSponge;
    impl KeccakSponge for StubSponge {
        fn keccak256(&self, input: &[u32]) -> [u32; 8] {
            let mut out = [0u32; 8];
            for (i, &w) in input.iter().enumerate() {
                out[i % 8] ^= w.wrapping_add(i as u32);
            }
            out
        }
        fn keccak512(&self, input: &[u32]) -> [u32; 16] {
            let mut out = [0u32; 16];
            for (i, &w) in input.iter().enumerate() {
                out[i % 16] ^= w.wrapping_add(i as u32 * 7 + 1);
            }
            out
        }
    }

    #[test]
    fn setup_rejects_invalid_seed_length() {
        let sponge = StubSponge;
        let err = Evaluator::setup(Params::tiny(), &[0u8; 5], &sponge).unwrap_err();
        assert_eq!(err, EthashError::InvalidSeed { len: 5 });
    }

    #[test]
    fn setup_rejects_invalid_params() {
        let sponge = StubSponge;
        let bad = Params {
            cache_size: 100,
            ..Params::tiny()
        };
        let err = Evaluator::setup(bad, &[0u8; 32], &sponge).unwrap_err();
        assert!(matches!(err, EthashError::InvalidParams { .. }));
    }

    #[test]
    fn two_instances_from_equal_params_agree() {
        let sponge = StubSponge;
        let e1 = Evaluator::setup(Params::tiny(), &[0u8; 32], &sponge).unwrap();
        let e2 = Evaluator::setup(Params::tiny(), &[0u8; 32], &sponge).unwrap();

        assert_eq!(e1.cache_digest(&sponge), e2.cache_digest(&sponge));
        for n in 0u64..16 {
            let header = [0u8; 32];
            let nonce = n.to_le_bytes();
            assert_eq!(e1.hash(&header, &nonce, &sponge), e2.hash(&header, &nonce, &sponge));
        }
    }

    #[test]
    fn seed_bit_flip_changes_cache_digest_and_hash() {
        let sponge = StubSponge;
        let e0 = Evaluator::setup(Params::tiny(), &[0u8; 32], &sponge).unwrap();

        let mut seed = [0u8; 32];
        seed[0] ^= 0x01;
        let e1 = Evaluator::setup(Params::tiny(), &seed, &sponge).unwrap();

        assert_ne!(e0.cache_digest(&sponge), e1.cache_digest(&sponge));
        assert_ne!(
            e0.hash(&[0u8; 32], &[0u8; 8], &sponge),
            e1.hash(&[0u8; 32], &[0u8; 8], &sponge)
        );
    }
}
