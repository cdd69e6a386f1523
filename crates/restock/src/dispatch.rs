// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatcher: texts the alert on a fresh restock.

use std::sync::Arc;

use restock_config::model::{NotifyConfig, NotifyMode, ProductConfig};
use restock_core::{AvailabilityTransition, PhoneNumber, SmsTransport};
use restock_state::StateStore;
use tracing::{error, info, warn};

pub struct Dispatcher {
    transport: Arc<dyn SmsTransport>,
    store: StateStore,
    product: ProductConfig,
    config: NotifyConfig,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn SmsTransport>,
        store: StateStore,
        product: ProductConfig,
        config: NotifyConfig,
    ) -> Self {
        Self {
            transport,
            store,
            product,
            config,
        }
    }

    /// Sends the restock alert if and only if the transition is a fresh
    /// availability edge. Returns how many recipients were reached.
    ///
    /// The recipient set is snapshotted once; a subscriber added by a racing
    /// run mid-dispatch is not guaranteed inclusion. One recipient's failure
    /// never blocks the others, and no failure — opt-out included — removes
    /// a subscriber here: only the subscription processor's acknowledgment
    /// path unsubscribes, because a one-off delivery failure is not proof of
    /// permanent opt-out.
    pub async fn dispatch(&self, transition: AvailabilityTransition) -> usize {
        if !transition.is_newly_available() {
            return 0;
        }

        let recipients: Vec<PhoneNumber> = match self.config.mode {
            NotifyMode::Broadcast => self.store.subscribers().into_iter().collect(),
            NotifyMode::Single => self
                .config
                .recipient
                .as_deref()
                .map(PhoneNumber::from)
                .into_iter()
                .collect(),
        };

        if recipients.is_empty() {
            warn!("product is newly available but there is nobody to notify");
            return 0;
        }

        let body = format!(
            "🚨 ALERT: {} IS NOW IN STOCK! Check the listing immediately: {}",
            self.product.name, self.product.url
        );

        let mut sent = 0;
        for to in &recipients {
            match self.transport.send(to, &body).await {
                Ok(id) => {
                    info!(%to, sid = %id.0, "alert sent");
                    sent += 1;
                }
                Err(e) => {
                    error!(%to, error = %e, "alert delivery failed");
                }
            }
        }

        info!(sent, total = recipients.len(), "notification dispatch complete");
        sent
    }
}
