// SPDX-FileCopyrightText: 2026 Restock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Twilio Messages REST API (2010-04-01).

use serde::{Deserialize, Serialize};

/// A page of message resources from `GET .../Messages.json`.
#[derive(Debug, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub messages: Vec<MessageResource>,
}

/// A single message resource.
///
/// Only the fields the watcher reads; Twilio sends many more.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// RFC 2822, e.g. `Fri, 24 May 2019 17:44:46 +0000`.
    #[serde(default)]
    pub date_created: Option<String>,
    /// Delivery error, possibly set only after the create call returns.
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// Form body for `POST .../Messages.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendMessageForm<'a> {
    pub to: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_service_sid: Option<&'a str>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
