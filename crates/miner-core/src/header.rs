//! Getwork header layout and the wire transforms applied to it.
//!
//! Pools hand out the 80-byte header as hex with every 32-bit word
//! byte-swapped relative to the buffer that gets hashed, followed by the
//! SHA-256 message padding for an 80-byte message. Fetching strips the
//! padding and flips the words; submitting does the reverse.

use crate::error::{Error, Result};

/// Length of a block header in bytes.
pub const HEADER_LEN: usize = 80;

/// Length of a block header in hex characters.
pub const HEADER_HEX_LEN: usize = HEADER_LEN * 2;

/// Byte offset of the nonce field (the last 4 bytes of the header).
pub const NONCE_OFFSET: usize = HEADER_LEN - 4;

/// Padding appended to a submitted header: the 0x80 terminator, zero fill
/// and the big-endian bit length 0x280 (640 bits), in word-flipped order.
pub const PADDING: &str =
    "000000800000000000000000000000000000000000000000000000000000000000000000000000000000000080020000";

/// A raw 80-byte block header.
pub type HeaderBuffer = [u8; HEADER_LEN];

/// Reverse the byte order inside every 4-byte word of a hex string.
///
/// Applying it twice restores the input.
pub fn flip_word_endianness(hex: &str) -> Result<String> {
    if !hex.is_ascii() {
        return Err(Error::MalformedHex("non-ASCII character".to_string()));
    }
    if hex.len() % 8 != 0 {
        return Err(Error::MisalignedWords { len: hex.len() });
    }

    let mut flipped = String::with_capacity(hex.len());
    for word in hex.as_bytes().chunks_exact(8) {
        for pair in word.chunks_exact(2).rev() {
            flipped.push(pair[0] as char);
            flipped.push(pair[1] as char);
        }
    }
    Ok(flipped)
}

/// Keep the header portion of a pool payload, dropping the pool's padding.
pub fn remove_padding(hex: &str) -> Result<String> {
    hex.get(..HEADER_HEX_LEN)
        .map(str::to_string)
        .ok_or(Error::ShortPayload { len: hex.len() })
}

/// Append the fixed padding block to a 160-character header.
pub fn add_padding(hex: &str) -> Result<String> {
    if hex.len() != HEADER_HEX_LEN {
        return Err(Error::HeaderHexLength { len: hex.len() });
    }
    let mut padded = String::with_capacity(HEADER_HEX_LEN + PADDING.len());
    padded.push_str(hex);
    padded.push_str(PADDING);
    Ok(padded)
}

/// Decode a pool `data` payload into a raw header buffer.
pub fn header_from_wire(data: &str) -> Result<HeaderBuffer> {
    let hex = flip_word_endianness(&remove_padding(data)?)?;
    let bytes = crate::codec::decode(&hex)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| Error::HeaderLength { len })
}

/// Encode a raw header as the padded payload a pool expects on submission.
pub fn header_to_wire(header: &HeaderBuffer) -> Result<String> {
    add_padding(&flip_word_endianness(&crate::codec::encode(header))?)
}
