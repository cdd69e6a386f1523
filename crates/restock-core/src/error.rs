// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the restock watcher.

use thiserror::Error;

/// The primary error type used across the restock adapter traits and core
/// operations.
///
/// Components downgrade these at their own boundary: the orchestrator only
/// ever sees well-typed results (booleans, counts), never a raw error. The
/// one variant callers are expected to match on is [`RestockError::OptedOut`],
/// which is the transport's authoritative "this recipient has blocked us"
/// signal and must stay distinguishable from transient delivery failures.
#[derive(Debug, Error)]
pub enum RestockError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Page fetch errors (connection failure, HTTP error status).
    #[error("fetch error: {message}")]
    Fetch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// SMS transport errors (API failure, malformed response).
    #[error("sms error: {message}")]
    Sms {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The recipient has permanently opted out of messages from the
    /// service identity (Twilio error 21610).
    #[error("recipient {recipient} has opted out")]
    OptedOut { recipient: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },
}

impl RestockError {
    /// Whether this error is worth retrying within a bounded budget.
    ///
    /// Only timeouts and fetch-level transport failures qualify; everything
    /// else is either permanent or already a final classification.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RestockError::Timeout { .. } | RestockError::Fetch { .. }
        )
    }
}
