use crate::payload::NotificationPayload;
use crate::traits::NotificationSender;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::error::Error as _;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Response of a request that reached the service, 2xx or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Encode,
    Connect,
    Timeout,
    Body,
    Request,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Encode => "encode",
            FailureKind::Connect => "connect",
            FailureKind::Timeout => "timeout",
            FailureKind::Body => "body",
            FailureKind::Request => "request",
        };
        f.write_str(name)
    }
}

/// A request that never produced a readable response.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // the request URL carries the token
        let e = e.without_url();
        let kind = if e.is_timeout() {
            FailureKind::Timeout
        } else if e.is_connect() {
            FailureKind::Connect
        } else if e.is_body() || e.is_decode() {
            FailureKind::Body
        } else {
            FailureKind::Request
        };
        // reqwest's Display omits the cause chain
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::new(kind, message)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(FailureKind::Encode, e.to_string())
    }
}

/// Posts payloads to a PushBits-style `/message` endpoint, one request at a time.
#[derive(Clone, Debug)]
pub struct HttpNotificationSender {
    client: Client,
    endpoint: Url,
    token: String,
}

impl HttpNotificationSender {
    pub fn new(endpoint: Url, token: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            token: token.into(),
        })
    }
}

#[async_trait]
impl NotificationSender for HttpNotificationSender {
    #[tracing::instrument(name = "deliver", skip(self, payload), fields(title = %payload.title))]
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryResponse, TransportError> {
        let body = payload.to_json()?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("token", &self.token)])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!(status = status.as_u16(), "Notification delivered");
        } else {
            warn!(status = status.as_u16(), body = %text, "Service answered with a non-success status");
        }

        Ok(DeliveryResponse {
            status: status.as_u16(),
            body: text,
        })
    }
}

/// Dry-run sender: answers with the document that would have been posted.
#[derive(Clone, Debug, Default)]
pub struct PreviewSender;

impl PreviewSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSender for PreviewSender {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryResponse, TransportError> {
        Ok(DeliveryResponse {
            status: 200,
            body: payload.to_json()?,
        })
    }
}
