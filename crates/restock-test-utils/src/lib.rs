// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the restock workspace.
//!
//! Mock implementations of the adapter traits with injectable inputs and
//! captured outputs, for deterministic orchestration tests.

pub mod mock_fetcher;
pub mod mock_sms;

pub use mock_fetcher::MockFetcher;
pub use mock_sms::{MockSms, SentSms};
