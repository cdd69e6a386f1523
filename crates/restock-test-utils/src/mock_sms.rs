// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock SMS transport for deterministic testing.
//!
//! `MockSms` implements [`SmsTransport`] with an injectable inbound page and
//! captured outbound messages for assertion in tests, plus per-number
//! failure and opt-out scripting.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use restock_core::{InboundSms, MessageId, PhoneNumber, RestockError, SmsTransport};
use tokio::sync::Mutex;

/// A captured outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: PhoneNumber,
    pub body: String,
}

/// A mock SMS transport.
///
/// Provides:
/// - **inbound**: messages injected via `inject_inbound()` are returned by
///   `list_inbound()` in injection order (inject newest first to mirror the
///   provider).
/// - **sent**: messages passed to `send()` are captured and retrievable via
///   `sent_messages()`.
/// - scripting knobs for listing failure, per-number send failure, and
///   per-number opt-out at send or confirm time.
#[derive(Default)]
pub struct MockSms {
    inbound: Mutex<Vec<InboundSms>>,
    sent: Mutex<Vec<SentSms>>,
    fail_listing: AtomicBool,
    fail_send_to: Mutex<HashSet<String>>,
    optout_on_send: Mutex<HashSet<String>>,
    optout_on_confirm: Mutex<HashSet<String>>,
}

impl MockSms {
    /// Create a mock transport with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject one inbound message into the listing page.
    pub async fn inject_inbound(
        &self,
        from: &str,
        body: &str,
        received_at: DateTime<Utc>,
    ) {
        self.inbound.lock().await.push(InboundSms {
            id: MessageId(format!("SM{}", uuid::Uuid::new_v4().simple())),
            from: PhoneNumber::from(from),
            body: body.to_string(),
            received_at,
        });
    }

    /// All messages sent through `send()`, in send order.
    pub async fn sent_messages(&self) -> Vec<SentSms> {
        self.sent.lock().await.clone()
    }

    /// Count of messages sent through `send()`.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Make `list_inbound()` fail with a transport error.
    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    /// Make `send()` to `number` fail with a transient transport error.
    pub async fn fail_send_to(&self, number: &str) {
        self.fail_send_to.lock().await.insert(number.to_string());
    }

    /// Make `send()` to `number` fail immediately with an opt-out error.
    pub async fn optout_on_send(&self, number: &str) {
        self.optout_on_send.lock().await.insert(number.to_string());
    }

    /// Make `confirm_delivery()` for `number` report an opt-out.
    pub async fn optout_on_confirm(&self, number: &str) {
        self.optout_on_confirm.lock().await.insert(number.to_string());
    }
}

#[async_trait]
impl SmsTransport for MockSms {
    async fn list_inbound(&self) -> Result<Vec<InboundSms>, RestockError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(RestockError::Sms {
                message: "mock listing failure".to_string(),
                source: None,
            });
        }
        Ok(self.inbound.lock().await.clone())
    }

    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<MessageId, RestockError> {
        if self.optout_on_send.lock().await.contains(&to.0) {
            return Err(RestockError::OptedOut {
                recipient: to.0.clone(),
            });
        }
        if self.fail_send_to.lock().await.contains(&to.0) {
            return Err(RestockError::Sms {
                message: format!("mock send failure to {to}"),
                source: None,
            });
        }
        self.sent.lock().await.push(SentSms {
            to: to.clone(),
            body: body.to_string(),
        });
        Ok(MessageId(format!("SM{}", uuid::Uuid::new_v4().simple())))
    }

    async fn confirm_delivery(
        &self,
        _id: &MessageId,
        to: &PhoneNumber,
    ) -> Result<(), RestockError> {
        if self.optout_on_confirm.lock().await.contains(&to.0) {
            return Err(RestockError::OptedOut {
                recipient: to.0.clone(),
            });
        }
        Ok(())
    }
}
