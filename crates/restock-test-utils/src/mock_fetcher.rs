// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock page fetcher with scripted per-attempt outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use restock_core::{PageFetcher, RestockError};
use tokio::sync::Mutex;

/// One scripted fetch outcome.
enum FetchOutcome {
    Html(String),
    Timeout,
    TransportError(String),
}

/// A mock page fetcher for deterministic probe tests.
///
/// Outcomes are consumed front-to-back, one per `fetch()` call. An empty
/// script fails the fetch, so a test that scripts two timeouts against a
/// three-attempt budget will see the third attempt fail too.
#[derive(Default)]
pub struct MockFetcher {
    script: Mutex<VecDeque<FetchOutcome>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    /// Create a mock fetcher with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful fetch returning `html`.
    pub async fn push_html(&self, html: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(FetchOutcome::Html(html.into()));
    }

    /// Script a timeout (transient, retried by the prober).
    pub async fn push_timeout(&self) {
        self.script.lock().await.push_back(FetchOutcome::Timeout);
    }

    /// Script a transport-level failure (transient, retried by the prober).
    pub async fn push_transport_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(FetchOutcome::TransportError(message.into()));
    }

    /// Number of `fetch()` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, RestockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().await.pop_front() {
            Some(FetchOutcome::Html(html)) => Ok(html),
            Some(FetchOutcome::Timeout) => Err(RestockError::Timeout {
                duration: Duration::from_secs(30),
            }),
            Some(FetchOutcome::TransportError(message)) => {
                Err(RestockError::Fetch { message, source: None })
            }
            None => Err(RestockError::Fetch {
                message: "mock fetcher script exhausted".to_string(),
                source: None,
            }),
        }
    }
}
