//! Cloud API message payloads.
//!
//! Shapes follow the Business Cloud API message object: the envelope carries
//! `messaging_product`, the recipient, and a `type` tag whose value names the
//! sibling payload field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub messaging_product: &'static str,
    pub to: String,
    #[serde(flatten)]
    pub payload: MessagePayload,
}

impl OutboundMessage {
    /// Builds the envelope for a digits-only recipient.
    #[must_use]
    pub fn new(to: &str, payload: MessagePayload) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.chars().filter(char::is_ascii_digit).collect(),
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePayload {
    Text { text: TextBody },
    Template { template: TemplateRef },
    Interactive { interactive: Interactive },
    Location { location: LocationPayload },
    Image { image: MediaRef },
    Document { document: MediaRef },
}

impl MessagePayload {
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        MessagePayload::Text {
            text: TextBody { body: body.into() },
        }
    }

    #[must_use]
    pub fn template(name: impl Into<String>) -> Self {
        MessagePayload::Template {
            template: TemplateRef {
                name: name.into(),
                language: Language { code: "en" },
            },
        }
    }

    /// Quick-reply buttons with ids `btn_0`, `btn_1`, ... in label order.
    #[must_use]
    pub fn quick_replies(body: impl Into<String>, labels: &[&str]) -> Self {
        MessagePayload::Interactive {
            interactive: Interactive {
                kind: "button",
                body: InteractiveBody { text: body.into() },
                action: ButtonAction {
                    buttons: labels
                        .iter()
                        .enumerate()
                        .map(|(index, label)| Button {
                            kind: "reply",
                            reply: ButtonReply {
                                id: format!("btn_{index}"),
                                title: (*label).to_owned(),
                            },
                        })
                        .collect(),
                },
            },
        }
    }

    #[must_use]
    pub fn location(latitude: f64, longitude: f64, name: &str, address: &str) -> Self {
        MessagePayload::Location {
            location: LocationPayload {
                latitude,
                longitude,
                name: name.to_owned(),
                address: address.to_owned(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateRef {
    pub name: String,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct Language {
    pub code: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Interactive {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub body: InteractiveBody,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractiveBody {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonAction {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub reply: ButtonReply,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonReply {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// An inbound webhook message, reduced to what the router needs.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub from: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<InboundText>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl InboundMessage {
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.body.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundText {
    pub body: String,
}

/// Cloud API send acknowledgement.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub messages: Vec<MessageId>,
}

#[derive(Debug, Deserialize)]
pub struct MessageId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
