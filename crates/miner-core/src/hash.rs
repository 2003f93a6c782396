//! SHA256 double-hashing and the share difficulty check.

use sha2::{Digest, Sha256};

/// Number of trailing digest bytes that must be zero for a share.
pub const SHARE_ZERO_BYTES: usize = 4;

/// Bitcoin's double SHA256: SHA256(SHA256(data)).
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// Count zero bytes at the end of a digest, stopping at the first non-zero
/// byte or after `limit` bytes.
///
/// The digest's trailing bytes are the most significant ones once it is read
/// as a little-endian 256-bit number, so these are the "leading zeros" of the
/// hash as block explorers display it.
pub fn count_trailing_zero_bytes(hash: &[u8; 32], limit: usize) -> usize {
    hash.iter()
        .rev()
        .take(limit)
        .take_while(|byte| **byte == 0)
        .count()
}

/// Whether a digest meets the share target `0x00000000ffff..ff`: bytes 28..32
/// must all be zero.
#[inline]
pub fn meets_share_target(hash: &[u8; 32]) -> bool {
    count_trailing_zero_bytes(hash, SHARE_ZERO_BYTES) == SHARE_ZERO_BYTES
}
