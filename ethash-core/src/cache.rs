//! Cache construction: sequential Keccak-512 chaining followed by
//! `cacheRounds` passes of RandMemoHash.

use log::debug;

use crate::error::EthashError;
use crate::modarith::{mod64, P1};
use crate::params::Params;
use crate::sponge::KeccakSponge;

/// The immutable, 16-word-per-node cache an evaluator is built around.
/// Read-only for the lifetime of the `Evaluator` it belongs to.
#[derive(Debug, Clone)]
pub struct Cache {
    words: Vec<u32>,
}

impl Cache {
    /// Runs Phase A (sequential Keccak-512 chaining) and Phase B
    /// (`cache_rounds` passes of RandMemoHash) over `seed_words`.
    pub fn build(params: &Params, seed_words: &[u32], sponge: &impl KeccakSponge) -> Self {
        let node_count = params.cache_node_count();
        let mut words = vec![0u32; node_count * 16];

        debug!("cache: phase A, {node_count} nodes");
        let first = sponge.keccak512(seed_words);
        words[0..16].copy_from_slice(&first);
        for n in 1..node_count {
            let prev = &words[(n - 1) * 16..n * 16];
            let node = sponge.keccak512(prev);
            words[n * 16..(n + 1) * 16].copy_from_slice(&node);
        }

        for round in 0..params.cache_rounds {
            debug!("cache: phase B round {round}/{}", params.cache_rounds);
            Self::rand_memo_hash_round(&mut words, node_count, sponge);
        }
        debug!("cache: build complete");

        Cache { words }
    }

    fn rand_memo_hash_round(words: &mut [u32], node_count: usize, sponge: &impl KeccakSponge) {
        // In place, in index order: node n's predecessor read (p0 = n-1,
        // and any p1 < n) sees this round's already-updated value, not the
        // previous round's. That sequential dependency is what makes the
        // pass memory-hard.
        let mut join = [0u32; 32];
        for n in 0..node_count {
            let p0 = ((n + node_count - 1) % node_count) * 16;
            let p1 = mod64(words[n * 16], words[n * 16 + 1], node_count) * 16;

            join[0..16].copy_from_slice(&words[p0..p0 + 16]);
            join[16..32].copy_from_slice(&words[p1..p1 + 16]);

            let node = sponge.keccak512(&join);
            words[n * 16..(n + 1) * 16].copy_from_slice(&node);
        }
    }

    /// Number of 16-word nodes in the cache.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.words.len() / 16
    }

    /// The 16 words of node `index`.
    #[inline]
    pub fn node(&self, index: usize) -> &[u32] {
        &self.words[index * 16..(index + 1) * 16]
    }

    /// The cache's full word image, in cache order.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// `rand1 = clamp(cache[0], P1)`, the seed residue for DAG-node derivation.
    pub fn rand1(&self) -> u32 {
        crate::bbs::clamp(self.words[0], P1)
    }

    /// Keccak-256 over the cache's full word image, for diagnostic
    /// equivalence checks between two independently built caches.
    pub fn digest(&self, sponge: &impl KeccakSponge) -> [u32; 8] {
        sponge.keccak256(&self.words)
    }
}

/// Packs a byte string into little-endian 32-bit words. Fails with
/// `InvalidSeed` if the length is not a multiple of 4.
pub fn pack_seed_words(seed: &[u8]) -> Result<Vec<u32>, EthashError> {
    if seed.len() % 4 != 0 {
        return Err(EthashError::InvalidSeed { len: seed.len() });
    }
    Ok(seed
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
