//! Core logic for the getwork miner.
//!
//! This crate provides pure Rust implementations of:
//! - Hex encoding and decoding of header buffers
//! - The getwork wire transforms (word-wise endian flip, SHA256 padding)
//! - SHA256 double-hashing and the share target check
//! - The brute-force nonce search over a unit of work

pub mod codec;
pub mod error;
pub mod hash;
pub mod header;
pub mod work;

pub use error::{Error, Result};
pub use hash::{double_sha256, meets_share_target};
pub use header::{HeaderBuffer, HEADER_LEN, NONCE_OFFSET};
pub use work::{ShareCandidate, WorkUnit};
