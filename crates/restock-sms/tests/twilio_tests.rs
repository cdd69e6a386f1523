// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio transport behavior against a local mock API.

use std::time::Duration;

use restock_config::model::TwilioConfig;
use restock_core::{MessageId, PhoneNumber, RestockError, SmsTransport};
use restock_sms::TwilioSms;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SID: &str = "ACtest";
const TOKEN: &str = "secret";
const FROM: &str = "+15555550100";

fn transport(server: &MockServer) -> TwilioSms {
    let config = TwilioConfig {
        account_sid: Some(SID.into()),
        auth_token: Some(TOKEN.into()),
        from_number: Some(FROM.into()),
        messaging_service_sid: None,
    };
    TwilioSms::new(&config)
        .expect("credentials are complete")
        .with_base_url(server.uri())
        .with_confirm_delay(Duration::from_millis(1))
}

#[tokio::test]
async fn list_inbound_maps_and_skips_malformed_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/2010-04-01/Accounts/{SID}/Messages.json")))
        .and(query_param("To", FROM))
        .and(basic_auth(SID, TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {
                    "sid": "SM2",
                    "from": "+15555550199",
                    "to": FROM,
                    "body": "START",
                    "date_created": "Thu, 27 Aug 2026 10:05:00 +0000"
                },
                {
                    "sid": "SMbad",
                    "from": "+15555550198",
                    "to": FROM,
                    "body": "hello",
                    "date_created": "yesterday-ish"
                },
                {
                    "sid": "SM1",
                    "from": "+15555550198",
                    "to": FROM,
                    "body": "STOP",
                    "date_created": "Thu, 27 Aug 2026 09:00:00 +0000"
                }
            ]
        })))
        .mount(&server)
        .await;

    let inbound = transport(&server).list_inbound().await.expect("should list");
    assert_eq!(inbound.len(), 2, "unparsable-date message is skipped");
    assert_eq!(inbound[0].id, MessageId("SM2".into()));
    assert_eq!(inbound[0].from, PhoneNumber::from("+15555550199"));
    assert_eq!(inbound[0].body, "START");
    assert!(inbound[0].received_at > inbound[1].received_at, "newest first");
}

#[tokio::test]
async fn send_posts_form_and_returns_sid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/2010-04-01/Accounts/{SID}/Messages.json")))
        .and(basic_auth(SID, TOKEN))
        .and(body_string_contains("To=%2B15555550199"))
        .and(body_string_contains("From=%2B15555550100"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "SMsent",
            "to": "+15555550199",
            "error_code": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = transport(&server)
        .send(&PhoneNumber::from("+15555550199"), "alert body")
        .await
        .expect("send should succeed");
    assert_eq!(id, MessageId("SMsent".into()));
}

#[tokio::test]
async fn opt_out_error_code_is_distinguishable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 21610,
            "message": "Attempt to send to unsubscribed recipient",
            "status": 400
        })))
        .mount(&server)
        .await;

    let err = transport(&server)
        .send(&PhoneNumber::from("+15555550199"), "alert body")
        .await
        .expect_err("blocked recipient should fail");
    assert!(
        matches!(err, RestockError::OptedOut { ref recipient } if recipient == "+15555550199"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn other_api_errors_are_transient_sms_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "code": 20429,
            "message": "Too Many Requests",
            "status": 429
        })))
        .mount(&server)
        .await;

    let err = transport(&server)
        .send(&PhoneNumber::from("+15555550199"), "alert body")
        .await
        .expect_err("rate limit should fail");
    assert!(matches!(err, RestockError::Sms { .. }), "got {err:?}");
}

#[tokio::test]
async fn confirm_delivery_detects_delayed_opt_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/2010-04-01/Accounts/{SID}/Messages/SMsent.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SMsent",
            "to": "+15555550199",
            "error_code": 21610
        })))
        .mount(&server)
        .await;

    let err = transport(&server)
        .confirm_delivery(&MessageId("SMsent".into()), &PhoneNumber::from("+15555550199"))
        .await
        .expect_err("delayed opt-out should surface");
    assert!(matches!(err, RestockError::OptedOut { .. }), "got {err:?}");
}

#[tokio::test]
async fn confirm_delivery_passes_clean_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/2010-04-01/Accounts/{SID}/Messages/SMok.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SMok",
            "to": "+15555550199",
            "error_code": null
        })))
        .mount(&server)
        .await;

    transport(&server)
        .confirm_delivery(&MessageId("SMok".into()), &PhoneNumber::from("+15555550199"))
        .await
        .expect("clean message should confirm");
}

#[tokio::test]
async fn messaging_service_send_omits_from() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("MessagingServiceSid=MGtest"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "SMsvc",
            "error_code": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = TwilioConfig {
        account_sid: Some(SID.into()),
        auth_token: Some(TOKEN.into()),
        from_number: Some(FROM.into()),
        messaging_service_sid: Some("MGtest".into()),
    };
    let transport = TwilioSms::new(&config)
        .expect("credentials are complete")
        .with_base_url(server.uri());

    transport
        .send(&PhoneNumber::from("+15555550199"), "alert body")
        .await
        .expect("service send should succeed");
}
