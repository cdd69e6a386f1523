// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as a plausible listing URL, a non-zero retry budget, and
//! mode/field consistency.

use crate::diagnostic::ConfigError;
use crate::model::{NotifyMode, RestockConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RestockConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.product.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "product.name must not be empty".to_string(),
        });
    }

    let url = config.product.url.trim();
    if url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "product.url must not be empty".to_string(),
        });
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("product.url `{url}` must be an http(s) URL"),
        });
    }

    if config.probe.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "probe.max_attempts must be at least 1".to_string(),
        });
    }

    if config.probe.page_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "probe.page_timeout_secs must be at least 1".to_string(),
        });
    }

    let sub = &config.subscription;
    if sub.subscribe_keyword.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "subscription.subscribe_keyword must not be empty".to_string(),
        });
    }
    if sub.unsubscribe_keyword.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "subscription.unsubscribe_keyword must not be empty".to_string(),
        });
    }
    if !sub.subscribe_keyword.trim().is_empty()
        && sub.subscribe_keyword.eq_ignore_ascii_case(&sub.unsubscribe_keyword)
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "subscription keywords must differ, both are `{}`",
                sub.subscribe_keyword
            ),
        });
    }

    if config.notify.mode == NotifyMode::Single {
        match config.notify.recipient.as_deref().map(str::trim) {
            None | Some("") => errors.push(ConfigError::Validation {
                message: "notify.recipient is required when notify.mode = \"single\"".to_string(),
            }),
            Some(recipient) if !recipient.starts_with('+') => {
                errors.push(ConfigError::Validation {
                    message: format!("notify.recipient `{recipient}` must be in E.164 form (+...)"),
                });
            }
            Some(_) => {}
        }
    }

    if let Some(from) = config.twilio.from_number.as_deref()
        && !from.trim().is_empty()
        && !from.trim().starts_with('+')
    {
        errors.push(ConfigError::Validation {
            message: format!("twilio.from_number `{from}` must be in E.164 form (+...)"),
        });
    }

    if config.state.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "state.path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
