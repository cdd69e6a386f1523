// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio SMS transport for the restock watcher.
//!
//! Implements [`SmsTransport`] over the Twilio Messages REST API: inbound
//! polling filtered by the service number, form-encoded sends (from the bare
//! number or an optional Messaging Service), and opt-out classification.
//! Twilio reports a blocked recipient as error 21610 — sometimes on the
//! create call, sometimes only on the message resource afterwards, which is
//! what [`TwilioSms::confirm_delivery`] re-checks.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use restock_config::model::TwilioConfig;
use restock_core::{InboundSms, MessageId, PhoneNumber, RestockError, SmsTransport};
use tracing::{debug, info, warn};

use crate::types::{MessagePage, MessageResource, SendMessageForm, TwilioErrorBody};

/// Twilio's error code for a recipient who has replied STOP to the service
/// identity (attempt to send to an unsubscribed recipient).
pub const OPT_OUT_ERROR_CODE: i64 = 21610;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// How long to let Twilio settle before re-fetching a message resource for
/// a delayed delivery error.
const CONFIRM_DELAY: Duration = Duration::from_secs(1);

/// SMS transport backed by the Twilio REST API.
#[derive(Debug)]
pub struct TwilioSms {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
    messaging_service_sid: Option<String>,
    confirm_delay: Duration,
}

impl TwilioSms {
    /// Creates a transport from the Twilio config section.
    ///
    /// Fails with [`RestockError::Config`] when the account identity is
    /// incomplete; the caller is expected to log and run without SMS rather
    /// than crash (the probe does not need a transport).
    pub fn new(config: &TwilioConfig) -> Result<Self, RestockError> {
        let account_sid = required(&config.account_sid, "twilio.account_sid")?;
        let auth_token = required(&config.auth_token, "twilio.auth_token")?;
        let from_number = required(&config.from_number, "twilio.from_number")?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            account_sid,
            auth_token,
            from_number,
            messaging_service_sid: config.messaging_service_sid.clone(),
            confirm_delay: CONFIRM_DELAY,
        })
    }

    /// Points the client at a different API host. For tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the delay before a delivery re-check. For tests.
    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    /// The service number subscribers text.
    pub fn service_number(&self) -> PhoneNumber {
        PhoneNumber(self.from_number.clone())
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }

    fn message_url(&self, sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages/{}.json",
            self.base_url, self.account_sid, sid
        )
    }

    /// Maps a non-success Twilio response to the error taxonomy, keeping
    /// opt-out distinguishable from everything else.
    async fn classify_failure(
        response: reqwest::Response,
        recipient: Option<&PhoneNumber>,
    ) -> RestockError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if let Ok(err) = serde_json::from_str::<TwilioErrorBody>(&body)
            && err.code == Some(OPT_OUT_ERROR_CODE)
            && let Some(to) = recipient
        {
            return RestockError::OptedOut {
                recipient: to.0.clone(),
            };
        }
        RestockError::Sms {
            message: format!("twilio returned HTTP {status}: {body}"),
            source: None,
        }
    }

    async fn fetch_message(&self, sid: &str) -> Result<MessageResource, RestockError> {
        let response = self
            .http
            .get(self.message_url(sid))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| RestockError::Sms {
                message: format!("message fetch for {sid} failed"),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response, None).await);
        }

        response
            .json::<MessageResource>()
            .await
            .map_err(|e| RestockError::Sms {
                message: format!("unparsable message resource for {sid}"),
                source: Some(Box::new(e)),
            })
    }
}

fn required(value: &Option<String>, key: &str) -> Result<String, RestockError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(RestockError::Config(format!("{key} is not set"))),
    }
}

/// Parses Twilio's RFC 2822 `date_created` into UTC.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl SmsTransport for TwilioSms {
    async fn list_inbound(&self) -> Result<Vec<InboundSms>, RestockError> {
        let response = self
            .http
            .get(self.messages_url())
            .query(&[("To", self.from_number.as_str()), ("PageSize", "100")])
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| RestockError::Sms {
                message: "inbound message listing failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response, None).await);
        }

        let page: MessagePage = response.json().await.map_err(|e| RestockError::Sms {
            message: "unparsable message listing".to_string(),
            source: Some(Box::new(e)),
        })?;

        // Twilio returns newest first; preserve that order but do not rely
        // on it for correctness downstream.
        let mut inbound = Vec::with_capacity(page.messages.len());
        for msg in page.messages {
            let (Some(from), Some(raw_date)) = (msg.from.clone(), msg.date_created.clone())
            else {
                warn!(sid = %msg.sid, "skipping message without sender or date");
                continue;
            };
            let Some(received_at) = parse_date(&raw_date) else {
                warn!(sid = %msg.sid, date = %raw_date, "skipping message with unparsable date");
                continue;
            };
            inbound.push(InboundSms {
                id: MessageId(msg.sid),
                from: PhoneNumber(from),
                body: msg.body.unwrap_or_default(),
                received_at,
            });
        }
        debug!(count = inbound.len(), "listed inbound messages");
        Ok(inbound)
    }

    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<MessageId, RestockError> {
        // Prefer the Messaging Service identity when configured; Twilio
        // picks the sender number from the service's pool.
        let form = SendMessageForm {
            to: to.0.as_str(),
            body,
            from: match self.messaging_service_sid {
                Some(_) => None,
                None => Some(self.from_number.as_str()),
            },
            messaging_service_sid: self.messaging_service_sid.as_deref(),
        };
        let encoded = serde_urlencoded::to_string(&form).map_err(|e| RestockError::Sms {
            message: "failed to encode send form".to_string(),
            source: Some(Box::new(e)),
        })?;

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(encoded)
            .send()
            .await
            .map_err(|e| RestockError::Sms {
                message: format!("send to {to} failed"),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response, Some(to)).await);
        }

        let created: MessageResource =
            response.json().await.map_err(|e| RestockError::Sms {
                message: "unparsable send response".to_string(),
                source: Some(Box::new(e)),
            })?;

        if created.error_code == Some(OPT_OUT_ERROR_CODE) {
            return Err(RestockError::OptedOut {
                recipient: to.0.clone(),
            });
        }

        info!(%to, sid = %created.sid, "sms sent");
        Ok(MessageId(created.sid))
    }

    async fn confirm_delivery(
        &self,
        id: &MessageId,
        to: &PhoneNumber,
    ) -> Result<(), RestockError> {
        tokio::time::sleep(self.confirm_delay).await;
        let resource = self.fetch_message(&id.0).await?;
        if resource.error_code == Some(OPT_OUT_ERROR_CODE) {
            info!(%to, sid = %id.0, "delayed opt-out reported on message resource");
            return Err(RestockError::OptedOut {
                recipient: to.0.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twilio_dates_parse_to_utc() {
        let dt = parse_date("Fri, 24 May 2019 17:44:46 +0000").expect("should parse");
        assert_eq!(dt.to_rfc3339(), "2019-05-24T17:44:46+00:00");
        assert!(parse_date("not a date").is_none());
    }

    #[test]
    fn send_form_prefers_messaging_service() {
        let form = SendMessageForm {
            to: "+15555550100",
            body: "hi",
            from: None,
            messaging_service_sid: Some("MG123"),
        };
        let encoded = serde_urlencoded::to_string(&form).unwrap();
        assert!(encoded.contains("MessagingServiceSid=MG123"));
        assert!(!encoded.contains("From="));
    }

    #[test]
    fn missing_credentials_fail_construction() {
        let config = TwilioConfig {
            account_sid: Some("AC123".into()),
            auth_token: None,
            from_number: Some("+15555550100".into()),
            messaging_service_sid: None,
        };
        let err = TwilioSms::new(&config).expect_err("missing token should fail");
        assert!(matches!(err, RestockError::Config(_)));
        assert!(err.to_string().contains("twilio.auth_token"));
    }
}
