use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering hint telling the receiving client how to interpret `message`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContentType {
    #[serde(rename = "text/plain")]
    Plain,
    #[default]
    #[serde(rename = "text/html")]
    Html,
    #[serde(rename = "text/markdown")]
    Markdown,
}

impl ContentType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain",
            ContentType::Html => "text/html",
            ContentType::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientDisplay {
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
}

/// The `extras` object of a notification. Only the `client::display` namespace is used.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Extras {
    #[serde(rename = "client::display")]
    pub client_display: ClientDisplay,
}

/// A single notification as accepted by `POST /message`.
///
/// `priority: None` is not the same as `Some(0)`: the field is left out of the
/// document so the service applies its own default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotificationPayload {
    pub message: String,
    pub title: String,
    pub extras: Extras,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, message: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            message: message.into(),
            title: title.into(),
            extras: Extras {
                client_display: ClientDisplay { content_type },
            },
            priority: None,
        }
    }

    pub fn html(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ContentType::Html)
    }

    pub fn markdown(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ContentType::Markdown)
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.extras.client_display.content_type
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}
