// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the restock workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A phone number in canonical E.164 form (`+15555550100`).
///
/// Numbers are compared byte-for-byte; canonicalization is the transport's
/// job (Twilio already hands back E.164 on both send and list).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(pub String);

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhoneNumber {
    fn from(s: &str) -> Self {
        PhoneNumber(s.to_string())
    }
}

/// Delivery identifier returned by the SMS transport (Twilio message SID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// The classified change (or non-change) in availability between two
/// consecutive probes.
///
/// Only [`AvailabilityTransition::BecameAvailable`] triggers notification
/// dispatch. Computed in exactly one place (`StateStore::update_availability`)
/// so callers can never derive a transition from a stale local copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum AvailabilityTransition {
    /// Was unavailable, still unavailable.
    StillUnavailable,
    /// Was available, still available. Dispatch is skipped: the alert for
    /// this availability window already went out.
    StillAvailable,
    /// Flipped from unavailable to available. The only dispatching case.
    BecameAvailable,
    /// Flipped from available to unavailable (sold out again, or the page
    /// became unreachable). Recorded so a later restock re-arms the alert.
    BecameUnavailable,
}

impl AvailabilityTransition {
    /// Classify the transition between a stored value and a fresh probe.
    pub fn classify(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, false) => AvailabilityTransition::StillUnavailable,
            (true, true) => AvailabilityTransition::StillAvailable,
            (false, true) => AvailabilityTransition::BecameAvailable,
            (true, false) => AvailabilityTransition::BecameUnavailable,
        }
    }

    /// Whether this transition should trigger a notification broadcast.
    pub fn is_newly_available(&self) -> bool {
        matches!(self, AvailabilityTransition::BecameAvailable)
    }
}

/// An inbound SMS received by the service number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundSms {
    pub id: MessageId,
    pub from: PhoneNumber,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

/// How an inbound message body was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum CommandKind {
    Subscribe,
    Unsubscribe,
    Unrecognized,
}

/// An inbound message interpreted as a subscription command.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub sender: PhoneNumber,
    pub received_at: DateTime<Utc>,
    pub kind: CommandKind,
    pub raw_body: String,
}
