use thiserror::Error;

/// Errors that end a mining session.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed login '{0}', expected user:password@host:port")]
    MalformedLogin(String),

    #[error("didn't find valid 'data' in server response")]
    MissingWorkData,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response status: {status}")]
    UnexpectedResponse { status: reqwest::StatusCode },

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] miner_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
