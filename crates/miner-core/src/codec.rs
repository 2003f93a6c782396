//! Conversion between hexadecimal text and raw byte buffers.

use crate::error::{Error, Result};

/// Parse pairs of hex characters into bytes, left to right.
///
/// Upper and lower case digits are both accepted.
pub fn decode(hex: &str) -> Result<Vec<u8>> {
    hex::decode(hex).map_err(|e| Error::MalformedHex(e.to_string()))
}

/// Render each byte as two lowercase hex characters.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Render a nonce the way the miner reports it: its little-endian bytes in hex.
pub fn encode_nonce(nonce: u32) -> String {
    hex::encode(nonce.to_le_bytes())
}
