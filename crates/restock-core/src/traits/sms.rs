// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMS transport trait for inbound polling and outbound delivery.

use async_trait::async_trait;

use crate::error::RestockError;
use crate::types::{InboundSms, MessageId, PhoneNumber};

/// Adapter for the SMS provider.
///
/// The transport owns the service identity (the number subscribers text);
/// callers never pass it around.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Lists messages sent to the service number, newest first.
    ///
    /// Callers must not rely on the ordering for correctness: the
    /// subscription processor filters by timestamp rather than stopping at
    /// the first already-seen message.
    async fn list_inbound(&self) -> Result<Vec<InboundSms>, RestockError>;

    /// Sends `body` to `to` from the service identity.
    ///
    /// Returns the provider's delivery identifier. A permanent recipient
    /// opt-out surfaces as [`RestockError::OptedOut`]; transient failures as
    /// [`RestockError::Sms`].
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<MessageId, RestockError>;

    /// Re-checks a just-sent message for a delayed delivery error.
    ///
    /// Some providers accept the send and only flag a blocked recipient on
    /// the message resource afterwards. Returns [`RestockError::OptedOut`]
    /// if the recipient turned out to have opted out, `Ok(())` otherwise.
    async fn confirm_delivery(&self, id: &MessageId, to: &PhoneNumber)
    -> Result<(), RestockError>;
}
