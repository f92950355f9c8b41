//! # rocks environment state
//!
//! This module defines [`crate::env_state::RocksEnv`], the **shared HTTP environment** used
//! by the remote resolver. It wraps a persistent [`ureq::Agent`] configured with a global
//! timeout, so every remote lookup is bounded by the same deadline.
//!
//! ## Structure
//!
//! ```text
//! RocksEnv
//! └── http_client  (ureq::Agent, global timeout)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use rocks::env_state::RocksEnv;
//!
//! let env = RocksEnv::new(Duration::from_secs(5));
//! let body = env.get_with_query(
//!     "https://api.ssodnet.imcce.fr/quaero/1/sso/search",
//!     &[("q", "Ceres"), ("limit", "1")],
//! )?;
//! ```
//!
//! ## Notes
//!
//! - The agent is cheaply cloneable and shares its connection pool between clones,
//!   so a single environment can serve all workers of a batch resolution.
use std::time::Duration;

use ureq::Agent;

use crate::{constants::DEFAULT_TIMEOUT, rocks_errors::RocksError};

/// HTTP environment passed to the remote resolver.
///
/// # Fields
///
/// * `http_client` - A ureq agent used to make HTTP requests
/// * `timeout` - The global deadline configured on the agent
#[derive(Debug, Clone)]
pub struct RocksEnv {
    pub http_client: Agent,
    pub timeout: Duration,
}

impl Default for RocksEnv {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl RocksEnv {
    /// Create a new environment whose HTTP agent fails any call exceeding `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        RocksEnv {
            http_client: agent,
            timeout,
        }
    }

    /// Perform a GET request with query parameters and return the body as a string.
    ///
    /// Arguments
    /// -----------------
    /// * `url`: the endpoint to query
    /// * `query`: the `(key, value)` pairs appended to the URL, percent-encoded by ureq
    ///
    /// Return
    /// ----------
    /// * The response body, or a [`RocksError::UreqHttpError`] on transport failure,
    ///   timeout or non-2xx status.
    pub(crate) fn get_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, RocksError> {
        let request = query
            .iter()
            .fold(self.http_client.get(url), |request, (key, value)| {
                request.query(*key, *value)
            });
        let body = request.call()?.body_mut().read_to_string()?;
        Ok(body)
    }
}
