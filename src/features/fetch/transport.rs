//! HTTP transport boundary
//!
//! The gateway only needs "GET this URL, give me status and bytes". The
//! reqwest implementation owns timeouts and redirects; status handling is
//! left to the gateway so every transport is judged the same way.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::core::{Config, FetchError, FetchResult};

/// Raw response as received from the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        TransportResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One GET per call; implementations must not retry
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> FetchResult<TransportResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()?;
        Ok(ReqwestTransport { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> FetchResult<TransportResponse> {
        let failure = |reason: String| FetchError::Transport {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                failure("request timed out".to_string())
            } else if e.is_connect() {
                failure("could not connect to the server".to_string())
            } else {
                failure(format!("HTTP request failed: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| failure(format!("failed to read response body: {e}")))?;
        debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
