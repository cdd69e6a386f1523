// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration layer of the restock watcher.
//!
//! Exposes the run orchestrator, subscription processor, and notification
//! dispatcher as a library so integration tests can drive a full run against
//! mock adapters.

pub mod dispatch;
pub mod run;
pub mod subscription;

pub use dispatch::Dispatcher;
pub use run::{RunSummary, run, run_with};
pub use subscription::SubscriptionProcessor;
