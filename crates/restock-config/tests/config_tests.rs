// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the restock configuration system.

use restock_config::model::{InboundMode, NotifyMode};
use restock_config::{ConfigError, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_restock_config() {
    let toml = r#"
[service]
log_level = "debug"

[product]
name = "GeForce RTX 5090"
url = "https://example.com/p/list"

[probe]
max_attempts = 5
retry_delay_secs = 2
page_timeout_secs = 20
user_agent = "test-agent/1.0"

[twilio]
account_sid = "ACxxxxxxxx"
auth_token = "secret"
from_number = "+15555550100"

[subscription]
mode = "keyword"
subscribe_keyword = "START"
unsubscribe_keyword = "STOP"

[notify]
mode = "broadcast"

[state]
path = "/tmp/restock_state.json"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.product.name, "GeForce RTX 5090");
    assert_eq!(config.product.url, "https://example.com/p/list");
    assert_eq!(config.probe.max_attempts, 5);
    assert_eq!(config.probe.retry_delay_secs, 2);
    assert_eq!(config.probe.page_timeout_secs, 20);
    assert_eq!(config.twilio.account_sid.as_deref(), Some("ACxxxxxxxx"));
    assert_eq!(config.twilio.from_number.as_deref(), Some("+15555550100"));
    assert_eq!(config.subscription.mode, InboundMode::Keyword);
    assert_eq!(config.notify.mode, NotifyMode::Broadcast);
    assert_eq!(config.state.path, "/tmp/restock_state.json");
}

/// An empty config falls back to compiled defaults everywhere.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty config should deserialize");
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.probe.max_attempts, 3);
    assert_eq!(config.probe.retry_delay_secs, 5);
    assert_eq!(config.probe.page_timeout_secs, 30);
    assert_eq!(config.subscription.subscribe_keyword, "START");
    assert_eq!(config.subscription.unsubscribe_keyword, "STOP");
    assert_eq!(config.subscription.mode, InboundMode::Keyword);
    assert_eq!(config.notify.mode, NotifyMode::Broadcast);
    assert!(config.twilio.account_sid.is_none());
    assert!(!config.product.name.is_empty());
}

/// Unknown keys are rejected, not silently ignored.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[probe]
max_atempts = 5
"#;
    let err = load_config_from_str(toml).expect_err("unknown key should be rejected");
    let msg = err.to_string();
    assert!(msg.contains("max_atempts"), "error should name the key: {msg}");
}

/// Validation collects all problems instead of failing fast.
#[test]
fn validation_collects_all_errors() {
    let toml = r#"
[product]
name = ""
url = "ftp://example.com"

[probe]
max_attempts = 0

[notify]
mode = "single"
"#;
    let errors = load_and_validate_str(toml).expect_err("invalid config should fail validation");
    assert!(errors.len() >= 4, "expected at least 4 errors, got {}", errors.len());
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Single-recipient mode requires an E.164 recipient.
#[test]
fn single_mode_requires_recipient() {
    let toml = r#"
[notify]
mode = "single"
recipient = "5550100"
"#;
    let errors = load_and_validate_str(toml).expect_err("non-E.164 recipient should fail");
    assert!(
        errors.iter().any(|e| e.to_string().contains("notify.recipient")),
        "expected a notify.recipient error"
    );

    let toml_ok = r#"
[notify]
mode = "single"
recipient = "+15555550100"
"#;
    let config = load_and_validate_str(toml_ok).expect("E.164 recipient should pass");
    assert_eq!(config.notify.recipient.as_deref(), Some("+15555550100"));
}

/// Identical subscribe/unsubscribe keywords are rejected.
#[test]
fn identical_keywords_rejected() {
    let toml = r#"
[subscription]
subscribe_keyword = "GO"
unsubscribe_keyword = "go"
"#;
    let errors = load_and_validate_str(toml).expect_err("same keyword twice should fail");
    assert!(errors.iter().any(|e| e.to_string().contains("keywords must differ")));
}
