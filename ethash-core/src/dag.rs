//! On-demand DAG-node derivation from the cache. Nodes are never stored;
//! each call derives one 16-word node from scratch.

use crate::bbs::{advance, clamp, step};
use crate::cache::Cache;
use crate::fnv::fnv;
use crate::modarith::{mod32, P1, P2};
use crate::params::Params;

/// Derives DAG node `node_index` into `out` (16 words). `rand1` is the
/// cache's seed residue (see [`Cache::rand1`]); `advance`-ing it by
/// `node_index` gives cheap random access into the per-node BBS stream
/// without replaying every prior node.
///
/// Deliberately does not apply a final Keccak-512 to the node (the
/// canonical Ethash spec does; this pipeline does not, and conformance
/// is pinned against that behavior — see the module-level design notes).
pub fn derive_node(params: &Params, cache: &Cache, rand1: u32, node_index: u64, out: &mut [u32; 16]) {
    let mut rand2 = clamp(advance(rand1, node_index, P1), P2);

    let cache_node_count = cache.node_count();
    let base = (node_index as usize) % cache_node_count;
    out.copy_from_slice(cache.node(base));

    for p in 0..params.dag_parents as usize {
        let c = mod32(out[p % 16] ^ rand2, cache_node_count);
        let parent = cache.node(c);
        for w in 0..16 {
            out[w] = fnv(out[w], parent[w]);
        }
        rand2 = step(rand2, P2);
    }
}
