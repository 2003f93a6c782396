//! Getwork pool client.

use miner_core::header::{header_from_wire, header_to_wire};
use miner_core::{ShareCandidate, WorkUnit};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

use crate::credentials::PoolCredentials;
use crate::error::{Error, Result};
use crate::rpc::{self, Request};

/// The getwork method, used both to fetch and to submit.
const GETWORK: &str = "getwork";

/// A source of work that accepts shares back.
pub trait Pool {
    /// Fetch a fresh header template.
    fn get_work(&mut self) -> Result<WorkUnit>;

    /// Submit a found share, returning whether the pool accepted it.
    fn submit_share(&mut self, share: &ShareCandidate) -> Result<bool>;
}

/// Talks getwork JSON-RPC over HTTP to a single pool.
#[derive(Debug, Clone)]
pub struct PoolClient {
    credentials: PoolCredentials,
    http: Client,
}

impl PoolClient {
    /// Create a client whose requests give up after `timeout`.
    pub fn new(credentials: PoolCredentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(PoolClient::with_client(credentials, http))
    }

    /// Use an already configured HTTP client.
    pub fn with_client(credentials: PoolCredentials, http: Client) -> Self {
        PoolClient { credentials, http }
    }

    pub fn credentials(&self) -> &PoolCredentials {
        &self.credentials
    }

    /// POST a JSON-RPC call and return the response body.
    fn call(&self, method: &str, param: Option<&str>) -> Result<String> {
        let body = Request::new(method, param).to_body()?;
        debug!(url = self.credentials.url(), method, "rpc call");

        let response = self
            .http
            .post(self.credentials.url())
            .basic_auth(self.credentials.user(), Some(self.credentials.password()))
            .header(CONTENT_TYPE, rpc::CONTENT_TYPE)
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedResponse { status });
        }

        Ok(response.text()?)
    }
}

impl Pool for PoolClient {
    fn get_work(&mut self) -> Result<WorkUnit> {
        let reply = self.call(GETWORK, None)?;
        let data = rpc::find_data(&reply).ok_or(Error::MissingWorkData)?;
        Ok(WorkUnit::new(header_from_wire(data)?))
    }

    fn submit_share(&mut self, share: &ShareCandidate) -> Result<bool> {
        let payload = header_to_wire(share.header())?;
        let reply = self.call(GETWORK, Some(&payload))?;
        Ok(rpc::find_result(&reply))
    }
}
