//! Bot webhook handler.
//!
//! Receives Max platform updates, maps them to dialog events, and runs
//! the dialog service. The platform retries on non-200 responses, so
//! the handler acknowledges everything it can parse -- and everything
//! it cannot: a malformed or unknown update is logged and dropped, not
//! failed.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::json;
use tracing::warn;

use pitstop_core::dialog::Event;
use pitstop_types::wire::Update;

use crate::state::AppState;

/// POST /webhook - Receive an incoming bot update.
pub async fn receive_update(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<serde_json::Value> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "unparseable webhook update");
            return Json(json!({"ok": true}));
        }
    };

    if let Some((chat_id, sender_id, event)) = routed_event(update) {
        state.dialog.handle_update(chat_id, sender_id, event).await;
    }

    Json(json!({"ok": true}))
}

/// Map a platform update to `(chat_id, sender_id, Event)`.
///
/// The sender id falls back to the chat id when the platform omits the
/// user reference. Updates without a chat id cannot be answered and are
/// dropped.
fn routed_event(update: Update) -> Option<(i64, i64, Event)> {
    match update {
        Update::MessageCreated { message } => {
            let chat_id = message.chat_id?;
            let sender_id = message.sender.map(|s| s.user_id).unwrap_or(chat_id);
            let text = message
                .body
                .map(|b| b.text)
                .unwrap_or_default()
                .trim()
                .to_string();
            Some((chat_id, sender_id, Event::Text { text }))
        }
        Update::MessageCallback { callback } => {
            let chat_id = callback.message.as_ref().and_then(|m| m.chat_id)?;
            let sender_id = callback.user.map(|u| u.user_id).unwrap_or(chat_id);
            Some((
                chat_id,
                sender_id,
                Event::Button {
                    payload: callback.payload,
                },
            ))
        }
        Update::Unknown => {
            warn!("ignoring unknown update type");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_maps_to_text_event() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_type": "message_created",
                "message": {
                    "chat_id": 42,
                    "sender": {"user_id": 7},
                    "body": {"text": "  150 000 km  "}
                }
            }"#,
        )
        .unwrap();

        let (chat_id, sender_id, event) = routed_event(update).unwrap();
        assert_eq!(chat_id, 42);
        assert_eq!(sender_id, 7);
        assert_eq!(
            event,
            Event::Text {
                text: "150 000 km".to_string()
            }
        );
    }

    #[test]
    fn test_sender_defaults_to_chat_id() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_type": "message_created",
                "message": {"chat_id": 42, "body": {"text": "hi"}}
            }"#,
        )
        .unwrap();

        let (chat_id, sender_id, _) = routed_event(update).unwrap();
        assert_eq!(chat_id, 42);
        assert_eq!(sender_id, 42);
    }

    #[test]
    fn test_callback_maps_to_button_event() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_type": "message_callback",
                "callback": {
                    "message": {"chat_id": 42},
                    "user": {"user_id": 7},
                    "payload": "type:des"
                }
            }"#,
        )
        .unwrap();

        let (_, _, event) = routed_event(update).unwrap();
        assert_eq!(
            event,
            Event::Button {
                payload: "type:des".to_string()
            }
        );
    }

    #[test]
    fn test_update_without_chat_id_is_dropped() {
        let update: Update = serde_json::from_str(
            r#"{"update_type": "message_created", "message": {"body": {"text": "hi"}}}"#,
        )
        .unwrap();
        assert!(routed_event(update).is_none());
    }

    #[test]
    fn test_unknown_update_is_dropped() {
        let update: Update =
            serde_json::from_str(r#"{"update_type": "bot_started", "chat_id": 42}"#).unwrap();
        assert!(routed_event(update).is_none());
    }
}
