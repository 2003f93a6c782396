//! Errors raised while encoding or decoding getwork payloads.

use thiserror::Error;

/// Errors produced by the core codec and header transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Hex text with an odd length or a non-hex character.
    #[error("malformed hex: {0}")]
    MalformedHex(String),
    /// Word-wise endian flip needs whole 4-byte words (8 hex characters).
    #[error("hex length {len} is not a multiple of 8")]
    MisalignedWords { len: usize },
    /// Payload shorter than the 160-character header.
    #[error("payload has {len} hex characters, expected at least 160")]
    ShortPayload { len: usize },
    /// Header hex handed to padding is not exactly 160 characters.
    #[error("header has {len} hex characters, expected exactly 160")]
    HeaderHexLength { len: usize },
    /// Decoded header is not 80 bytes.
    #[error("header is {len} bytes, expected 80")]
    HeaderLength { len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
