// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page fetcher trait for retrieving listing HTML.

use async_trait::async_trait;

use crate::error::RestockError;

/// Adapter for fetching a rendered listing page.
///
/// Any mechanism satisfying "given a URL, return the final HTML within a
/// bounded timeout" is substitutable; the prober does not assume a specific
/// rendering engine. Errors should be [`RestockError::Timeout`] or
/// [`RestockError::Fetch`] so the retry loop can tell transient failures
/// apart from everything else.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url` and returns its HTML.
    async fn fetch(&self, url: &str) -> Result<String, RestockError>;
}
