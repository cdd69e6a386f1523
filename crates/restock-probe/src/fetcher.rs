// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reqwest-backed page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use restock_core::{PageFetcher, RestockError};
use tracing::debug;

/// Fetches listing pages over plain HTTPS with a bounded load timeout and a
/// realistic browser identity string (retail listing pages bot-block default
/// client user agents).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher with the given page timeout and User-Agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, RestockError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| RestockError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RestockError> {
        debug!(url, "fetching listing page");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RestockError::Timeout {
                    duration: self.timeout,
                }
            } else {
                RestockError::Fetch {
                    message: format!("request to {url} failed"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestockError::Fetch {
                message: format!("{url} returned HTTP {status}"),
                source: None,
            });
        }

        response.text().await.map_err(|e| RestockError::Fetch {
            message: format!("failed to read body from {url}"),
            source: Some(Box::new(e)),
        })
    }
}
