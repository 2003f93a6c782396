//! A restartable mining session against one pool.

use tracing::info;

use crate::config::MinerConfig;
use crate::credentials::PoolCredentials;
use crate::error::{Error, Result};
use crate::miner::{Miner, State};
use crate::pool::PoolClient;

/// Runs mining sessions back to back, carrying the nonce counter across
/// restarts.
#[derive(Debug, Clone)]
pub struct Session {
    config: MinerConfig,
    nonce: u32,
    state: State,
}

impl Session {
    pub fn new(config: MinerConfig, nonce: u32) -> Self {
        Session {
            config,
            nonce,
            state: State::SelectingPool,
        }
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Mine against the pool named by `login` until something fails, then
    /// return the error that ended the session.
    pub fn run(&mut self, login: &str) -> Error {
        self.state = State::SelectingPool;
        let result = self.mine(login);
        self.state = State::Idle;
        match result {
            Ok(never) => match never {},
            Err(err) => err,
        }
    }

    fn mine(&mut self, login: &str) -> Result<std::convert::Infallible> {
        let credentials = PoolCredentials::parse(login)?;
        info!("Server URL: {}", credentials.url());
        info!("User: {}", credentials.user());
        info!("Password: {}", credentials.password());

        let pool = PoolClient::new(credentials, self.config.request_timeout)?;
        let mut miner = Miner::new(pool, self.config.clone(), self.nonce);
        self.state = State::Working;

        let result = miner.run();
        self.nonce = miner.nonce();
        result
    }
}
