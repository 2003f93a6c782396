//! A unit of pool work and the brute-force nonce search over it.

use std::time::{Duration, Instant};

use crate::codec;
use crate::error::{Error, Result};
use crate::hash::{double_sha256, meets_share_target};
use crate::header::{HeaderBuffer, NONCE_OFFSET};

/// A header template handed out by the pool plus the working copy that
/// nonces are written into.
#[derive(Debug, Clone)]
pub struct WorkUnit {
    /// The header as received. Never modified.
    data: HeaderBuffer,
    /// Working copy holding the last nonce tried.
    current: HeaderBuffer,
    /// When the work was received.
    created: Instant,
}

impl WorkUnit {
    /// Wrap a header template fetched from the pool.
    pub fn new(data: HeaderBuffer) -> Self {
        WorkUnit {
            data,
            current: data,
            created: Instant::now(),
        }
    }

    /// Wrap a header given as a byte slice, which must be exactly 80 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let data = bytes
            .try_into()
            .map_err(|_| Error::HeaderLength { len: bytes.len() })?;
        Ok(WorkUnit::new(data))
    }

    /// Search up to `batch_size` nonces starting at `*nonce`.
    ///
    /// Each nonce is written little-endian into bytes 76..80 of the working
    /// copy, which is then double-hashed. On success returns `true` with
    /// `*nonce` at the winning value and the working copy holding the winning
    /// header. Otherwise returns `false` with `*nonce` advanced by
    /// `batch_size`, wrapping at `u32::MAX`, so the next call continues where
    /// this one stopped.
    pub fn find_share(&mut self, nonce: &mut u32, batch_size: u32) -> bool {
        for _ in 0..batch_size {
            self.current[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());

            if meets_share_target(&double_sha256(&self.current)) {
                return true;
            }

            *nonce = nonce.wrapping_add(1);
        }
        false
    }

    /// Capture the working copy as a share, meant to be called right after
    /// [`WorkUnit::find_share`] returned `true`.
    pub fn share(&self) -> ShareCandidate {
        ShareCandidate {
            header: self.current,
            hash: self.hash(),
        }
    }

    /// Double SHA256 of the working copy.
    pub fn hash(&self) -> [u8; 32] {
        double_sha256(&self.current)
    }

    /// The header template as received from the pool.
    pub fn data(&self) -> &HeaderBuffer {
        &self.data
    }

    /// The working copy with the last nonce tried.
    pub fn current(&self) -> &HeaderBuffer {
        &self.current
    }

    /// Time elapsed since the work was received.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

/// A header whose double hash met the share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCandidate {
    header: HeaderBuffer,
    hash: [u8; 32],
}

impl ShareCandidate {
    /// The winning header, nonce included.
    pub fn header(&self) -> &HeaderBuffer {
        &self.header
    }

    /// The winning nonce as stored in the header.
    pub fn nonce(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.header[NONCE_OFFSET..]);
        u32::from_le_bytes(bytes)
    }

    /// Double SHA256 of the header.
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// The header as hex, for reporting.
    pub fn header_hex(&self) -> String {
        codec::encode(&self.header)
    }
}
