//! Max messenger wire format.
//!
//! Inbound webhook updates are discriminated by `update_type`; only
//! `message_created` and `message_callback` carry conversation input,
//! every other type deserializes into `Update::Unknown` and is ignored
//! upstream. Outbound messages attach at most one inline keyboard.

use serde::{Deserialize, Serialize};

/// Inbound webhook update from the messenger platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "update_type", rename_all = "snake_case")]
pub enum Update {
    MessageCreated { message: IncomingMessage },
    MessageCallback { callback: Callback },
    #[serde(other)]
    Unknown,
}

/// A user-authored text message.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub sender: Option<UserRef>,
    #[serde(default)]
    pub body: Option<MessageBody>,
}

/// Message body; the platform omits `text` for media-only messages.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub text: String,
}

/// A button press on a previously sent inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Callback {
    #[serde(default)]
    pub message: Option<CallbackMessage>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub payload: String,
}

/// The message a callback button belonged to.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackMessage {
    pub chat_id: Option<i64>,
}

/// Minimal user reference carried on messages and callbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub user_id: i64,
}

/// A tappable inline-keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub payload: String,
}

impl Button {
    /// A callback button: tapping it delivers `payload` back via webhook.
    pub fn callback(text: impl Into<String>, payload: impl Into<String>) -> Self {
        Button {
            kind: "callback".to_string(),
            text: text.into(),
            payload: payload.into(),
        }
    }
}

/// Transport-free outbound reply produced by the conversation core.
///
/// `buttons` is an ordered sequence of rows, each row an ordered
/// sequence of buttons. The gateway turns this into a platform message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<Button>>,
}

impl Reply {
    /// A plain text reply without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// A reply with an inline keyboard.
    pub fn with_buttons(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Reply {
            text: text.into(),
            buttons,
        }
    }
}

/// Outbound message payload for `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl OutboundMessage {
    /// Render a core `Reply` as a platform message for `chat_id`.
    pub fn from_reply(chat_id: i64, reply: &Reply) -> Self {
        let attachments = if reply.buttons.is_empty() {
            None
        } else {
            Some(vec![Attachment::inline_keyboard(reply.buttons.clone())])
        };
        OutboundMessage {
            chat_id,
            text: reply.text.clone(),
            attachments,
        }
    }
}

/// Message attachment; only inline keyboards are sent by this backend.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: KeyboardPayload,
}

impl Attachment {
    fn inline_keyboard(buttons: Vec<Vec<Button>>) -> Self {
        Attachment {
            kind: "inline_keyboard".to_string(),
            payload: KeyboardPayload { buttons },
        }
    }
}

/// Inline keyboard payload: rows of buttons.
#[derive(Debug, Clone, Serialize)]
pub struct KeyboardPayload {
    pub buttons: Vec<Vec<Button>>,
}
