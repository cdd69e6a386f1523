// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the restock watcher.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every section is optional and defaults to values
//! that make a dry run safe (Twilio credentials default to unset, which
//! disables the SMS components rather than failing the run).

use serde::{Deserialize, Serialize};

/// Top-level restock configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `RESTOCK_*`
/// environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RestockConfig {
    /// Service-wide settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// The tracked product and where to look for it.
    #[serde(default)]
    pub product: ProductConfig,

    /// Page probe retry budget and transport settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Twilio account identity.
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// Inbound subscription command handling.
    #[serde(default)]
    pub subscription: SubscriptionConfig,

    /// Outbound notification targeting.
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Durable state file settings.
    #[serde(default)]
    pub state: StateConfig,
}

/// Service-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The product being watched.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProductConfig {
    /// Exact substring to match against listing titles (case-sensitive,
    /// the verbatim marketing name).
    #[serde(default = "default_product_name")]
    pub name: String,

    /// Retailer listing page URL.
    #[serde(default = "default_listing_url")]
    pub url: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: default_product_name(),
            url: default_listing_url(),
        }
    }
}

fn default_product_name() -> String {
    "GeForce RTX 5090".to_string()
}

fn default_listing_url() -> String {
    "https://www.newegg.com/p/pl?N=100007709%20601469153%2050001314%2050001312%2050001315"
        .to_string()
}

/// Probe retry budget and HTTP transport settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Maximum fetch attempts per probe.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed backoff between attempts, in seconds.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Page load timeout, in seconds.
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Browser identity string sent with page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            page_timeout_secs: default_page_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_page_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36"
        .to_string()
}

/// Twilio account identity.
///
/// All fields default to unset; an incomplete identity disables the SMS
/// components for the run instead of failing it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TwilioConfig {
    /// Twilio account SID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_sid: Option<String>,

    /// Twilio auth token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// The service phone number subscribers text, in E.164 form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_number: Option<String>,

    /// Optional Messaging Service SID to send through instead of the bare
    /// from number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_service_sid: Option<String>,
}

/// How inbound messages are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InboundMode {
    /// Recognized keywords subscribe/unsubscribe; anything else gets a help
    /// reply.
    #[default]
    Keyword,
    /// Any sender is subscribed and sent a confirmation.
    Implicit,
}

/// Inbound subscription command handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionConfig {
    /// Inbound interpretation mode.
    #[serde(default)]
    pub mode: InboundMode,

    /// Keyword that subscribes the sender (matched case-insensitively as a
    /// substring of the body).
    #[serde(default = "default_subscribe_keyword")]
    pub subscribe_keyword: String,

    /// Keyword that unsubscribes the sender.
    #[serde(default = "default_unsubscribe_keyword")]
    pub unsubscribe_keyword: String,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            mode: InboundMode::default(),
            subscribe_keyword: default_subscribe_keyword(),
            unsubscribe_keyword: default_unsubscribe_keyword(),
        }
    }
}

fn default_subscribe_keyword() -> String {
    "START".to_string()
}

fn default_unsubscribe_keyword() -> String {
    "STOP".to_string()
}

/// Who receives availability alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Alert every number in the subscriber registry.
    #[default]
    Broadcast,
    /// Alert a single fixed recipient (`notify.recipient`).
    Single,
}

/// Outbound notification targeting.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Notification targeting mode.
    #[serde(default)]
    pub mode: NotifyMode,

    /// Fixed recipient for `single` mode, in E.164 form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Durable state file settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StateConfig {
    /// Path of the persisted state record.
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    "restock_state.json".to_string()
}
