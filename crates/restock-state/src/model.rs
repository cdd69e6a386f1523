// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted state record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use restock_core::PhoneNumber;
use serde::{Deserialize, Serialize};

/// The single durable record for the tracked product.
///
/// One record per product; it is created implicitly on first write and never
/// deleted. Every field defaults individually so a record written by an older
/// schema (or a partially-written one) is backfilled rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Last known availability, authoritative for edge detection.
    pub available: bool,

    /// Opt-in subscriber registry. Set semantics are enforced here at the
    /// boundary, not assumed from whatever is on disk.
    pub subscribers: BTreeSet<PhoneNumber>,

    /// Watermark for inbound-message polling; `None` means "never polled".
    pub last_message_cursor: Option<DateTime<Utc>>,
}
