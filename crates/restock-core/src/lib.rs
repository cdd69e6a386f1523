// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the restock availability watcher.
//!
//! This crate provides the error type, domain types, and adapter traits used
//! throughout the restock workspace. The page fetcher and SMS transport are
//! external collaborators; everything here specifies them only at their
//! interface boundary.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RestockError;
pub use traits::{PageFetcher, SmsTransport};
pub use types::{
    AvailabilityTransition, CommandKind, InboundCommand, InboundSms, MessageId, PhoneNumber,
};
