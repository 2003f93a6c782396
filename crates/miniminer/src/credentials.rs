//! Pool login parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Where and as whom to mine, parsed from `user:password@host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolCredentials {
    url: String,
    user: String,
    password: String,
}

impl PoolCredentials {
    /// Parse a login string.
    ///
    /// The user ends at the first `:` and the password at the first `@`;
    /// everything after the `@` is the pool's `host:port`.
    pub fn parse(login: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedLogin(login.to_string());

        let at = login.find('@').ok_or_else(malformed)?;
        let colon = login.find(':').ok_or_else(malformed)?;
        if colon > at {
            return Err(malformed());
        }

        let host = &login[at + 1..];
        if host.is_empty() {
            return Err(malformed());
        }

        Ok(PoolCredentials {
            url: format!("http://{host}"),
            user: login[..colon].to_string(),
            password: login[colon + 1..at].to_string(),
        })
    }

    /// The pool endpoint, `http://host:port`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl FromStr for PoolCredentials {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoolCredentials::parse(s)
    }
}

impl fmt::Display for PoolCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.url)
    }
}
