//! Progress reporting for the mining loop.

use std::fmt;
use std::time::Duration;

use miner_core::codec;

/// Hashes per second, displayed with a unit prefix.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct HashRate(pub f64);

impl HashRate {
    /// Rate for `hashes` computed over `elapsed`. Zero if no time passed.
    pub fn from_batch(hashes: u32, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            HashRate(f64::from(hashes) / secs)
        } else {
            HashRate(0.0)
        }
    }

    /// Whole thousands of hashes per second, the miner's headline figure.
    pub fn kilohashes(&self) -> u64 {
        (self.0 / 1_000.0) as u64
    }
}

impl fmt::Display for HashRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1_000_000_000.0 {
            write!(f, "{:.2} GH/s", self.0 / 1_000_000_000.0)
        } else if self.0 >= 1_000_000.0 {
            write!(f, "{:.2} MH/s", self.0 / 1_000_000.0)
        } else if self.0 >= 1_000.0 {
            write!(f, "{:.2} KH/s", self.0 / 1_000.0)
        } else {
            write!(f, "{:.2} H/s", self.0)
        }
    }
}

/// Snapshot taken after a batch that found no share.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Next nonce to try.
    pub nonce: u32,
    /// Double hash of the last header tried.
    pub hash: [u8; 32],
    /// Speed since the previous report.
    pub hash_rate: HashRate,
}

impl Progress {
    /// Position in the nonce space, in percent.
    pub fn percent(&self) -> f64 {
        f64::from(self.nonce) / f64::from(u32::MAX) * 100.0
    }

    /// `current/max` with both rendered as little-endian hex.
    pub fn nonce_display(&self) -> String {
        format!(
            "{}/{}",
            codec::encode_nonce(self.nonce),
            codec::encode_nonce(u32::MAX)
        )
    }

    pub fn hash_hex(&self) -> String {
        codec::encode(&self.hash)
    }
}
