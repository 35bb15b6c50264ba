//! The per-`(header, nonce)` hash pipeline (C6): seed, replicate, mix
//! against the virtual DAG, compress, and envelope with Keccak-256 twice.

use log::trace;

use crate::bbs::{clamp, step};
use crate::cache::Cache;
use crate::dag::derive_node;
use crate::fnv::fnv;
use crate::modarith::{mod32, P2};
use crate::params::Params;
use crate::sponge::KeccakSponge;

/// Computes the 32-byte (8-word) digest for `header` (16 words, 64 bytes
/// of header ∥ nonce ∥ zero padding already assembled by the caller).
///
/// `header_nonce_words` must be exactly 16 words: bytes [0,32) of header,
/// [32,40) of nonce, [40,64) zero padding, all little-endian.
pub fn hash(
    params: &Params,
    cache: &Cache,
    rand1: u32,
    header_nonce_words: &[u32; 16],
    sponge: &impl KeccakSponge,
) -> [u32; 8] {
    trace!("hash: mix_word_count={}", params.mix_word_count());

    let mix_word_count = params.mix_word_count();
    let mut mix = vec![0u32; mix_word_count + 16];

    // Initial Keccak-512 over the header/nonce seed.
    let s = sponge.keccak512(header_nonce_words);
    mix[0..16].copy_from_slice(&s);

    // Replicate s across the working area.
    for w in 16..mix_word_count + 16 {
        mix[w] = mix[w % 16];
    }

    let mut rand2 = clamp(mix[0], P2);
    let mix_node_count = params.mix_node_count();
    let dag_page_count = params.dag_page_count();

    let mut temp_node = [0u32; 16];
    for a in 0..params.mix_parents as usize {
        let idx = a % mix_word_count;
        let d = mod32(mix[idx] ^ rand2, dag_page_count) * mix_node_count;

        for n in 0..mix_node_count {
            derive_node(params, cache, rand1, (d + n) as u64, &mut temp_node);
            let base = 16 + n * 16;
            for v in 0..16 {
                mix[base + v] = fnv(mix[base + v], temp_node[v]);
            }
        }
        rand2 = step(rand2, P2);
    }

    // Compression: Keccak-256 over the full working buffer, written right
    // after s.
    let compressed = sponge.keccak256(&mix[0..mix_word_count + 16]);
    mix[16..24].copy_from_slice(&compressed);

    // Final envelope: Keccak-256(s || compressed_mix).
    sponge.keccak256(&mix[0..24])
}
