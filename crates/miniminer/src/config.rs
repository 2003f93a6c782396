use std::time::Duration;

/// Nonces tried per search call before control returns to the loop.
pub const DEFAULT_BATCH_SIZE: u32 = 100_000;

/// Work older than this is replaced before the next batch.
pub const DEFAULT_MAX_WORK_AGE: Duration = Duration::from_secs(20);

/// Upper bound on a single pool request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Mining loop settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerConfig {
    pub batch_size: u32,
    pub max_work_age: Duration,
    pub request_timeout: Duration,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            max_work_age: DEFAULT_MAX_WORK_AGE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
