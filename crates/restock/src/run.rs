// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run orchestrator: one stateless invocation end to end.
//!
//! Sequence: process inbound subscription messages, probe availability,
//! dispatch the alert if and only if the transition is genuinely new. Every
//! component failure is downgraded inside the component; the run always
//! completes and logs a terminal status.

use std::sync::Arc;
use std::time::Duration;

use restock_config::RestockConfig;
use restock_core::{AvailabilityTransition, PageFetcher, SmsTransport};
use restock_probe::{HttpFetcher, Prober};
use restock_sms::TwilioSms;
use restock_state::StateStore;
use tracing::{error, info, warn};

use crate::dispatch::Dispatcher;
use crate::subscription::SubscriptionProcessor;

/// Terminal status of one run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Inbound messages handled by the subscription processor.
    pub processed_inbound: usize,
    /// Availability observed by this run's probe.
    pub available: bool,
    /// Transition recorded against the stored state.
    pub transition: AvailabilityTransition,
    /// Recipients reached by the dispatcher.
    pub notified: usize,
}

/// Runs one full check with production adapters.
pub async fn run(config: &RestockConfig) -> RunSummary {
    // An incomplete Twilio identity disables the SMS-dependent components
    // for the run; the probe still executes and keeps state current.
    let transport: Option<Arc<dyn SmsTransport>> = match TwilioSms::new(&config.twilio) {
        Ok(t) => Some(Arc::new(t)),
        Err(e) => {
            error!(error = %e, "sms transport disabled for this run");
            None
        }
    };

    let fetcher: Option<Arc<dyn PageFetcher>> = match HttpFetcher::new(
        Duration::from_secs(config.probe.page_timeout_secs),
        &config.probe.user_agent,
    ) {
        Ok(f) => Some(Arc::new(f)),
        Err(e) => {
            error!(error = %e, "page fetcher failed to start, probe will record not-available");
            None
        }
    };

    run_with(config, transport, fetcher).await
}

/// Runs one full check with injected adapters. Exposed for tests.
pub async fn run_with(
    config: &RestockConfig,
    transport: Option<Arc<dyn SmsTransport>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
) -> RunSummary {
    let store = StateStore::new(&config.state.path);

    info!(product = %config.product.name, "checking for subscription messages");
    let processed_inbound = match &transport {
        Some(transport) => {
            SubscriptionProcessor::new(
                transport.clone(),
                store.clone(),
                config.product.clone(),
                config.subscription.clone(),
            )
            .process_inbound()
            .await
        }
        None => 0,
    };

    info!(product = %config.product.name, "starting availability check");
    let (available, transition) = match &fetcher {
        Some(fetcher) => {
            Prober::new(
                fetcher.clone(),
                store.clone(),
                config.product.clone(),
                &config.probe,
            )
            .probe()
            .await
        }
        // Fetcher startup failure is a negative probe, not a crash: it still
        // goes through the store so a stale "available" flag gets flipped.
        None => (false, store.update_availability(false)),
    };

    let notified = match &transport {
        Some(transport) => {
            Dispatcher::new(
                transport.clone(),
                store.clone(),
                config.product.clone(),
                config.notify.clone(),
            )
            .dispatch(transition)
            .await
        }
        None => {
            if transition.is_newly_available() {
                warn!("product is newly available but sms transport is disabled");
            }
            0
        }
    };

    let summary = RunSummary {
        processed_inbound,
        available,
        transition,
        notified,
    };
    info!(
        processed = summary.processed_inbound,
        available = summary.available,
        transition = %summary.transition,
        notified = summary.notified,
        "run complete"
    );
    summary
}
