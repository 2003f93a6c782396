//! A minimal getwork pool miner.
//!
//! This crate provides:
//! - Pool login parsing
//! - A blocking JSON-RPC getwork client
//! - The batched mining loop with work refresh and share submission
//! - Restartable sessions that keep the nonce counter across restarts

pub mod config;
pub mod credentials;
pub mod error;
pub mod miner;
pub mod pool;
pub mod rpc;
pub mod session;
pub mod stats;

pub use config::MinerConfig;
pub use credentials::PoolCredentials;
pub use error::{Error, Result};
pub use miner::{Miner, MiningEvent, State};
pub use pool::{Pool, PoolClient};
pub use session::Session;
pub use stats::{HashRate, Progress};
