//! A [`KeccakSponge`] implementation backed by the `sha3` crate, plus the
//! little-endian byte/word conversion helpers `ethash-core` treats as an
//! external concern (§1 of the pipeline spec).

use byteorder::{ByteOrder, LittleEndian};
use sha3::{Digest, Keccak256, Keccak512};

use ethash_core::KeccakSponge;

/// `sha3`-backed Keccak-256/512 sponge. Stateless; cheap to construct
/// per call or share behind a reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha3Sponge;

impl KeccakSponge for Sha3Sponge {
    fn keccak256(&self, input: &[u32]) -> [u32; 8] {
        let bytes = words_to_bytes(input);
        let mut hasher = Keccak256::new();
        hasher.update(&bytes);
        bytes_to_words8(&hasher.finalize())
    }

    fn keccak512(&self, input: &[u32]) -> [u32; 16] {
        let bytes = words_to_bytes(input);
        let mut hasher = Keccak512::new();
        hasher.update(&bytes);
        bytes_to_words16(&hasher.finalize())
    }
}

/// Packs a little-endian word slice into its byte image.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    let mut out = vec![0u8; words.len() * 4];
    LittleEndian::write_u32_into(words, &mut out);
    out
}

/// Unpacks a 32-byte little-endian image into 8 words.
pub fn bytes_to_words8(bytes: &[u8]) -> [u32; 8] {
    let mut out = [0u32; 8];
    LittleEndian::read_u32_into(&bytes[0..32], &mut out);
    out
}

/// Unpacks a 64-byte little-endian image into 16 words.
pub fn bytes_to_words16(bytes: &[u8]) -> [u32; 16] {
    let mut out = [0u32; 16];
    LittleEndian::read_u32_into(&bytes[0..64], &mut out);
    out
}
