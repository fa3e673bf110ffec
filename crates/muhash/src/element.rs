//! Hash-to-field: turning arbitrary bytes into a 3072-bit multiset element.

use crate::types::{Hash, HASH_SIZE};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, Key, Nonce};
use num3072::{Num3072, ELEMENT_BYTE_SIZE};

/// BLAKE2b key used when hashing element data.
pub(crate) const ELEMENT_KEY: &[u8] = b"MuHashElement";

/// BLAKE2b key used when hashing the serialized multiset.
pub(crate) const FINALIZE_KEY: &[u8] = b"MuHashFinalize";

/// 32-byte BLAKE2b of `data`, keyed with `key`.
pub(crate) fn keyed_blake2b(key: &[u8], data: &[u8]) -> Hash {
    let digest = blake2b_simd::Params::new()
        .hash_length(HASH_SIZE)
        .key(key)
        .hash(data);
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(digest.as_bytes());
    Hash::from_bytes(out)
}

/// Maps `data` to a field element: a keyed BLAKE2b seed expanded to 3072 bits
/// of ChaCha20 keystream (zero nonce), read as little-endian limbs.
///
/// The result is not reduced modulo p. Landing in `[p, 2^3072)` has
/// probability `d / 2^3072` and is left as is, so the output stays identical
/// to other implementations of the scheme.
pub fn element_from_data(data: &[u8]) -> Num3072 {
    let seed = keyed_blake2b(ELEMENT_KEY, data);

    let mut cipher = ChaCha20::new(Key::from_slice(seed.as_bytes()), &Nonce::default());
    let mut bytes = [0u8; ELEMENT_BYTE_SIZE];
    cipher.apply_keystream(&mut bytes);

    Num3072::from_le_bytes(&bytes)
}
