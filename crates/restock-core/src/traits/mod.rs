// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits marking the swappable collaborator boundaries.
//!
//! The watcher core only ever talks to the page and to the SMS provider
//! through these traits; production code plugs in reqwest and Twilio,
//! tests plug in mocks.

pub mod fetcher;
pub mod sms;

pub use fetcher::PageFetcher;
pub use sms::SmsTransport;
