// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription processor: turns inbound SMS into registry changes.
//!
//! Polls the transport's inbound log since the stored watermark, classifies
//! each fresh message per the configured mode, applies the registry change,
//! and acknowledges the sender. A permanent opt-out reported on the
//! acknowledgment is an authoritative unsubscribe and overrides the add that
//! just happened.

use std::sync::Arc;

use chrono::{Duration, Utc};
use restock_config::model::{InboundMode, ProductConfig, SubscriptionConfig};
use restock_core::{CommandKind, InboundCommand, InboundSms, RestockError, SmsTransport};
use restock_state::StateStore;
use tracing::{error, info, warn};

/// Bootstrap window when the cursor has never been set: look back one hour
/// instead of scanning the account's whole message history.
const BOOTSTRAP_WINDOW_HOURS: i64 = 1;

pub struct SubscriptionProcessor {
    transport: Arc<dyn SmsTransport>,
    store: StateStore,
    product: ProductConfig,
    config: SubscriptionConfig,
}

impl SubscriptionProcessor {
    pub fn new(
        transport: Arc<dyn SmsTransport>,
        store: StateStore,
        product: ProductConfig,
        config: SubscriptionConfig,
    ) -> Self {
        Self {
            transport,
            store,
            product,
            config,
        }
    }

    /// Processes all inbound messages newer than the watermark and returns
    /// how many were handled.
    ///
    /// Messages are selected by `received_at > cursor` across the whole
    /// page rather than by stopping at the first old one, so an unordered
    /// transport page cannot skip commands. The cursor advances to the
    /// newest inbound timestamp once the page is fully handled — a page of
    /// pure noise still moves the watermark, and an empty page advances it
    /// to now so the bootstrap window is not re-applied forever.
    ///
    /// A transport failure aborts the remainder of this component's work
    /// (registry changes already saved are kept, the cursor stays put so
    /// unacknowledged commands are retried next run); it never propagates.
    pub async fn process_inbound(&self) -> usize {
        let cursor = self
            .store
            .cursor()
            .unwrap_or_else(|| Utc::now() - Duration::hours(BOOTSTRAP_WINDOW_HOURS));

        let messages = match self.transport.list_inbound().await {
            Ok(messages) => messages,
            Err(e) => {
                error!(error = %e, "inbound listing failed, skipping subscription processing");
                return 0;
            }
        };

        if messages.is_empty() {
            info!("no inbound messages");
            self.store.advance_cursor(Utc::now());
            return 0;
        }

        // max(), not first(): ordering is the transport's habit, not a contract.
        let newest = messages
            .iter()
            .map(|m| m.received_at)
            .max()
            .unwrap_or_else(Utc::now);

        let mut processed = 0;
        for msg in messages.iter().filter(|m| m.received_at > cursor) {
            let command = self.classify(msg);
            match self.apply(&command).await {
                Ok(()) => processed += 1,
                Err(e) => {
                    error!(sender = %command.sender, error = %e, "acknowledgment failed, aborting inbound processing");
                    return processed;
                }
            }
        }

        self.store.advance_cursor(newest);
        info!(processed, "processed inbound messages");
        processed
    }

    /// Classifies a message body under the configured mode.
    ///
    /// Keyword matching mirrors the SMS convention: the body is trimmed and
    /// uppercased, then checked for the keyword as a substring, subscribe
    /// keyword first. Implicit mode treats every message as a subscribe.
    fn classify(&self, msg: &InboundSms) -> InboundCommand {
        let kind = match self.config.mode {
            InboundMode::Implicit => CommandKind::Subscribe,
            InboundMode::Keyword => {
                let body = msg.body.trim().to_uppercase();
                if body.contains(&self.config.subscribe_keyword.to_uppercase()) {
                    CommandKind::Subscribe
                } else if body.contains(&self.config.unsubscribe_keyword.to_uppercase()) {
                    CommandKind::Unsubscribe
                } else {
                    CommandKind::Unrecognized
                }
            }
        };
        InboundCommand {
            sender: msg.from.clone(),
            received_at: msg.received_at,
            kind,
            raw_body: msg.body.clone(),
        }
    }

    /// Applies one command to the registry and acknowledges the sender.
    async fn apply(&self, command: &InboundCommand) -> Result<(), RestockError> {
        let product = &self.product.name;
        let subscribe = &self.config.subscribe_keyword;
        let unsubscribe = &self.config.unsubscribe_keyword;

        let reply = match command.kind {
            CommandKind::Subscribe => {
                if self.store.add_subscriber(&command.sender) {
                    match self.config.mode {
                        InboundMode::Implicit => format!(
                            "You're subscribed for {product} alerts. We'll text you when it's in stock."
                        ),
                        InboundMode::Keyword => format!(
                            "You've been subscribed to {product} stock alerts! Reply '{unsubscribe}' to unsubscribe."
                        ),
                    }
                } else {
                    format!("You're already subscribed to {product} stock alerts.")
                }
            }
            CommandKind::Unsubscribe => {
                if self.store.remove_subscriber(&command.sender) {
                    format!(
                        "You've been unsubscribed from {product} stock alerts. Reply '{subscribe}' to subscribe again."
                    )
                } else {
                    format!("You're not currently subscribed to {product} stock alerts.")
                }
            }
            CommandKind::Unrecognized => format!(
                "To subscribe to {product} stock alerts, reply with '{subscribe}'. To unsubscribe, reply with '{unsubscribe}'."
            ),
        };

        info!(sender = %command.sender, kind = %command.kind, "handled inbound command");
        self.acknowledge(command, &reply).await
    }

    /// Sends the acknowledgment and re-checks it for a delayed opt-out.
    ///
    /// An opt-out at either point removes the sender from the registry and
    /// is not an error: the transport-level block is the sender's answer.
    async fn acknowledge(
        &self,
        command: &InboundCommand,
        reply: &str,
    ) -> Result<(), RestockError> {
        let id = match self.transport.send(&command.sender, reply).await {
            Ok(id) => id,
            Err(RestockError::OptedOut { .. }) => {
                info!(sender = %command.sender, "sender has opted out, removing from registry");
                self.store.remove_subscriber(&command.sender);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        match self.transport.confirm_delivery(&id, &command.sender).await {
            Ok(()) => Ok(()),
            Err(RestockError::OptedOut { .. }) => {
                info!(sender = %command.sender, "delayed opt-out on acknowledgment, removing from registry");
                self.store.remove_subscriber(&command.sender);
                Ok(())
            }
            Err(e) => {
                // The ack itself went out; a failed re-check is not worth
                // aborting the page over.
                warn!(sender = %command.sender, error = %e, "delivery re-check failed");
                Ok(())
            }
        }
    }
}
