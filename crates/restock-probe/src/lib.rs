// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Availability prober for the restock watcher.
//!
//! Fetches the listing page with a bounded retry budget, applies the markup
//! extractor, and records the observation through the state store. The store
//! is the only place transitions are computed; the prober just reports what
//! it saw.

pub mod extract;
pub mod fetcher;

use std::sync::Arc;
use std::time::Duration;

use restock_config::model::{ProbeConfig, ProductConfig};
use restock_core::{AvailabilityTransition, PageFetcher};
use restock_state::StateStore;
use tracing::{error, info, warn};

pub use fetcher::HttpFetcher;

/// One full availability check: fetch with retries, extract, record.
pub struct Prober {
    fetcher: Arc<dyn PageFetcher>,
    store: StateStore,
    product: ProductConfig,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Prober {
    /// Creates a prober over the given fetcher and state store.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: StateStore,
        product: ProductConfig,
        probe: &ProbeConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            product,
            max_attempts: probe.max_attempts.max(1),
            retry_delay: Duration::from_secs(probe.retry_delay_secs),
        }
    }

    /// Runs one probe and returns the observed availability together with
    /// the transition against the stored state.
    ///
    /// Every outcome path — positive, negative, exhausted retries, fetch
    /// failure — ends in exactly one `update_availability` call, so the
    /// store and the probe result never diverge. In particular an
    /// unreachable page records `false`: a prior available-now-unreachable
    /// sequence must flip state, or a stale "available" flag would suppress
    /// the next legitimate alert.
    pub async fn probe(&self) -> (bool, AvailabilityTransition) {
        let is_available = self.observe().await;
        let transition = self.store.update_availability(is_available);
        info!(available = is_available, %transition, "probe complete");
        (is_available, transition)
    }

    /// Fetch-and-extract with the retry budget. Only transient failures
    /// (timeouts, transport errors) are retried; a successful fetch is a
    /// definitive observation either way.
    async fn observe(&self) -> bool {
        for attempt in 1..=self.max_attempts {
            info!(attempt, max = self.max_attempts, "checking listing page");
            match self.fetcher.fetch(&self.product.url).await {
                Ok(html) => {
                    return extract::listing_availability(&html, &self.product.name);
                }
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!(attempt, error = %e, delay = ?self.retry_delay, "transient fetch failure, backing off");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    error!(attempt, error = %e, "probe failed, treating as not available");
                    return false;
                }
            }
        }
        false
    }
}
