// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable state store for the restock watcher.
//!
//! Owns the single persisted record: current availability, the subscriber
//! registry, and the inbound-message watermark. It is the sole source of
//! truth across invocations; every other component reads and writes through
//! it. There is deliberately no locking — overlapping runs are tolerated as
//! last-writer-wins, and callers needing strict exactly-once delivery must
//! serialize invocations in the scheduler.

pub mod model;
pub mod store;

pub use model::PersistedState;
pub use store::StateStore;
