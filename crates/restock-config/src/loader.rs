// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./restock.toml` > `~/.config/restock/restock.toml`
//! > `/etc/restock/restock.toml` with environment variable overrides via the
//! `RESTOCK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RestockConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/restock/restock.toml` (system-wide)
/// 3. `~/.config/restock/restock.toml` (user XDG config)
/// 4. `./restock.toml` (local directory)
/// 5. `RESTOCK_*` environment variables
pub fn load_config() -> Result<RestockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RestockConfig::default()))
        .merge(Toml::file("/etc/restock/restock.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("restock/restock.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("restock.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<RestockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RestockConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RestockConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RestockConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `RESTOCK_TWILIO_AUTH_TOKEN` must map to
/// `twilio.auth_token`, not `twilio.auth.token`.
fn env_provider() -> Env {
    Env::prefixed("RESTOCK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: RESTOCK_TWILIO_AUTH_TOKEN -> "twilio_auth_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("product_", "product.", 1)
            .replacen("probe_", "probe.", 1)
            .replacen("twilio_", "twilio.", 1)
            .replacen("subscription_", "subscription.", 1)
            .replacen("notify_", "notify.", 1)
            .replacen("state_", "state.", 1);
        mapped.into()
    })
}
