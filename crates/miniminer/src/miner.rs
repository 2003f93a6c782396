//! The mining loop: keep work fresh, search in batches, submit shares.

use std::convert::Infallible;
use std::time::Instant;

use miner_core::{codec, ShareCandidate, WorkUnit};
use tracing::{info, warn};

use crate::config::MinerConfig;
use crate::error::Result;
use crate::pool::Pool;
use crate::stats::{HashRate, Progress};

/// Where a mining session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting for pool credentials.
    SelectingPool,
    /// Searching the current work.
    Working,
    /// Sending a found share to the pool.
    Submitting,
    /// Stopped after an error, waiting to restart.
    Idle,
}

/// Outcome of a single loop iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum MiningEvent {
    /// The batch found nothing.
    Progress(Progress),
    /// A share was found and submitted.
    Share {
        share: ShareCandidate,
        accepted: bool,
    },
}

/// Drives a [`Pool`] and owns the work and nonce counter.
///
/// The nonce is not reset when work is replaced, so the search continues
/// where it left off.
pub struct Miner<P> {
    pool: P,
    config: MinerConfig,
    work: Option<WorkUnit>,
    nonce: u32,
    state: State,
    last_report: Instant,
}

impl<P: Pool> Miner<P> {
    pub fn new(pool: P, config: MinerConfig, nonce: u32) -> Self {
        Miner {
            pool,
            config,
            work: None,
            nonce,
            state: State::Working,
            last_report: Instant::now(),
        }
    }

    /// Next nonce to try.
    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn work(&self) -> Option<&WorkUnit> {
        self.work.as_ref()
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Run one iteration: refresh stale work, search one batch, and submit
    /// the share if one turned up.
    ///
    /// Any error leaves the miner [`State::Idle`].
    pub fn step(&mut self) -> Result<MiningEvent> {
        let result = self.try_step();
        if result.is_err() {
            self.state = State::Idle;
        }
        result
    }

    /// Step until an error occurs.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            match self.step()? {
                MiningEvent::Progress(progress) => {
                    if let Some(work) = &self.work {
                        info!("Data: {}", codec::encode(work.data()));
                    }
                    info!(
                        "Nonce: {} {:.2}%",
                        progress.nonce_display(),
                        progress.percent()
                    );
                    info!("Hash: {}", progress.hash_hex());
                    info!(
                        "Speed: {}Kh/s ({})",
                        progress.hash_rate.kilohashes(),
                        progress.hash_rate
                    );
                }
                MiningEvent::Share { share, accepted } => {
                    info!("Share: {}", share.header_hex());
                    info!("Nonce: {}", codec::encode_nonce(share.nonce()));
                    info!("Hash: {}", codec::encode(share.hash()));
                    if accepted {
                        info!("Server accepted the share");
                    } else {
                        warn!("Server declined the share");
                    }
                }
            }
        }
    }

    fn try_step(&mut self) -> Result<MiningEvent> {
        self.state = State::Working;

        let mut work = match self.work.take() {
            Some(work) if work.age() <= self.config.max_work_age => work,
            _ => {
                info!("Requesting work from pool");
                self.pool.get_work()?
            }
        };

        if work.find_share(&mut self.nonce, self.config.batch_size) {
            let share = work.share();
            info!(nonce = share.nonce(), "Found valid share");

            self.state = State::Submitting;
            let accepted = self.pool.submit_share(&share)?;
            self.state = State::Working;

            return Ok(MiningEvent::Share { share, accepted });
        }

        let now = Instant::now();
        let progress = Progress {
            nonce: self.nonce,
            hash: work.hash(),
            hash_rate: HashRate::from_batch(
                self.config.batch_size,
                now.duration_since(self.last_report),
            ),
        };
        self.last_report = now;
        self.work = Some(work);

        Ok(MiningEvent::Progress(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use miner_core::{HeaderBuffer, NONCE_OFFSET};
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::thread;
    use std::time::Duration;

    const GENESIS_NONCE: u32 = 2083236893;

    fn genesis_template() -> HeaderBuffer {
        let mut header = [0u8; 80];
        header.copy_from_slice(
            &hex::decode(
                "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c"
            ).unwrap(),
        );
        header[NONCE_OFFSET..].copy_from_slice(&[0; 4]);
        header
    }

    /// Hands out the genesis template and records submissions.
    #[derive(Default)]
    struct FakePool {
        fetches: usize,
        submitted: Vec<ShareCandidate>,
        verdicts: VecDeque<bool>,
        fail_fetch: bool,
    }

    impl Pool for FakePool {
        fn get_work(&mut self) -> Result<WorkUnit> {
            if self.fail_fetch {
                return Err(Error::MissingWorkData);
            }
            self.fetches += 1;
            Ok(WorkUnit::new(genesis_template()))
        }

        fn submit_share(&mut self, share: &ShareCandidate) -> Result<bool> {
            self.submitted.push(share.clone());
            Ok(self.verdicts.pop_front().unwrap_or(true))
        }
    }

    fn config(batch_size: u32) -> MinerConfig {
        MinerConfig {
            batch_size,
            ..MinerConfig::default()
        }
    }

    #[test]
    fn test_first_step_fetches_work() {
        let mut miner = Miner::new(FakePool::default(), config(100), 0);
        assert!(miner.work().is_none());

        let event = miner.step().unwrap();
        assert!(matches!(event, MiningEvent::Progress(_)));
        assert_eq!(miner.pool().fetches, 1);
        assert_eq!(miner.state(), State::Working);
        assert!(miner.work().is_some());
    }

    #[test]
    fn test_nonce_continues_across_batches() {
        let mut miner = Miner::new(FakePool::default(), config(100), 1_000);

        let MiningEvent::Progress(progress) = miner.step().unwrap() else {
            panic!("expected progress");
        };
        assert_eq!(progress.nonce, 1_100);
        assert_eq!(miner.nonce(), 1_100);

        miner.step().unwrap();
        assert_eq!(miner.nonce(), 1_200);
        // Fresh work is reused while it is young.
        assert_eq!(miner.pool().fetches, 1);
    }

    #[test]
    fn test_stale_work_is_replaced_without_resetting_nonce() {
        let config = MinerConfig {
            batch_size: 10,
            max_work_age: Duration::ZERO,
            ..MinerConfig::default()
        };
        let mut miner = Miner::new(FakePool::default(), config, 500);

        miner.step().unwrap();
        thread::sleep(Duration::from_millis(5));
        miner.step().unwrap();

        assert_eq!(miner.pool().fetches, 2);
        assert_eq!(miner.nonce(), 520);
    }

    #[test]
    fn test_found_share_is_submitted_once_and_work_dropped() {
        let mut miner = Miner::new(FakePool::default(), config(10), GENESIS_NONCE - 5);

        let MiningEvent::Share { share, accepted } = miner.step().unwrap() else {
            panic!("expected a share");
        };
        assert!(accepted);
        assert_eq!(share.nonce(), GENESIS_NONCE);
        assert_eq!(miner.nonce(), GENESIS_NONCE);
        assert_eq!(miner.pool().submitted, vec![share]);
        assert!(miner.work().is_none());
        assert_eq!(miner.state(), State::Working);

        // Next iteration fetches new work.
        miner.step().unwrap();
        assert_eq!(miner.pool().fetches, 2);
    }

    #[test]
    fn test_rejected_share_is_reported() {
        let pool = FakePool {
            verdicts: VecDeque::from([false]),
            ..FakePool::default()
        };
        let mut miner = Miner::new(pool, config(10), GENESIS_NONCE - 1);

        assert!(matches!(
            miner.step().unwrap(),
            MiningEvent::Share { accepted: false, .. }
        ));
    }

    #[test]
    fn test_errors_leave_miner_idle() {
        let pool = FakePool {
            fail_fetch: true,
            ..FakePool::default()
        };
        let mut miner = Miner::new(pool, config(10), 7);

        assert!(matches!(miner.step(), Err(Error::MissingWorkData)));
        assert_eq!(miner.state(), State::Idle);
        assert_eq!(miner.nonce(), 7);

        assert!(matches!(miner.run(), Err(Error::MissingWorkData)));
    }
}
