//! The message protocol between the isolated context and the host.
//!
//! The wire shape is the only contract with already-injected content and
//! must stay stable: a JSON object tagged by `type`, with `game-alert` /
//! `game-confirm` carrying `message` and `game-status` carrying `status`
//! plus an opaque `data` payload. New kinds extend [`GameMessage`], never an
//! ad hoc string check.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Status tag for score reports coming out of the isolated context.
pub const STATUS_SCORE_UPDATE: &str = "score-update";

/// One message from the isolated context. Fire-and-forget; delivery order is
/// whatever the channel provides, nothing is acknowledged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameMessage {
    /// A suppressed `alert()` call.
    #[serde(rename = "game-alert")]
    Alert {
        #[serde(default)]
        message: String,
    },
    /// A suppressed `confirm()` call. The frame already answered it
    /// affirmatively; the host only gets to show the text.
    #[serde(rename = "game-confirm")]
    Confirm {
        #[serde(default)]
        message: String,
    },
    /// A status report with an opaque payload.
    #[serde(rename = "game-status")]
    Status {
        #[serde(default)]
        status: String,
        #[serde(default)]
        data: Value,
    },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The raw event payload was not a recognizable protocol message.
    #[error("unrecognized message shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GameMessage {
    /// Decodes a raw JSON string from the channel. Unknown discriminants and
    /// malformed shapes are errors; the bridge drops them silently.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Severity of a host-side notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Caution,
}

/// What the host should do with a decoded message. Keeping this decision
/// pure leaves the DOM side effects at the very edge of the web app.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    /// Surface text on the notification surface.
    Notify { level: NoticeLevel, text: String },
    /// Hand the payload to the score parser.
    UpdateScore { payload: Value },
    /// Recognized kind, unrecognized content; do nothing.
    Drop,
}

/// The dispatch table. Total: anything that decoded routes somewhere, even
/// if only to [`HostAction::Drop`].
pub fn route(msg: &GameMessage) -> HostAction {
    match msg {
        GameMessage::Alert { message } => HostAction::Notify {
            level: NoticeLevel::Info,
            text: message.clone(),
        },
        GameMessage::Confirm { message } => HostAction::Notify {
            level: NoticeLevel::Caution,
            text: message.clone(),
        },
        GameMessage::Status { status, data } if status == STATUS_SCORE_UPDATE => {
            HostAction::UpdateScore {
                payload: data.clone(),
            }
        }
        GameMessage::Status { status, .. } => {
            tracing::debug!(status = status.as_str(), "dropping unknown status message");
            HostAction::Drop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_routes_to_info_notice() {
        let msg = GameMessage::decode(r#"{"type":"game-alert","message":"hi"}"#).unwrap();
        assert_eq!(
            route(&msg),
            HostAction::Notify {
                level: NoticeLevel::Info,
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn confirm_routes_to_caution_notice() {
        let msg = GameMessage::decode(r#"{"type":"game-confirm","message":"sure?"}"#).unwrap();
        assert_eq!(
            route(&msg),
            HostAction::Notify {
                level: NoticeLevel::Caution,
                text: "sure?".to_string()
            }
        );
    }

    #[test]
    fn score_update_forwards_the_payload() {
        let msg = GameMessage::decode(
            r#"{"type":"game-status","status":"score-update","data":{"text":"正确:3"}}"#,
        )
        .unwrap();
        assert_eq!(
            route(&msg),
            HostAction::UpdateScore {
                payload: json!({"text": "正确:3"})
            }
        );
    }

    #[test]
    fn unknown_status_tag_is_dropped() {
        let msg =
            GameMessage::decode(r#"{"type":"game-status","status":"heartbeat"}"#).unwrap();
        assert_eq!(route(&msg), HostAction::Drop);
    }

    #[test]
    fn unknown_discriminant_fails_decode() {
        assert!(GameMessage::decode(r#"{"type":"game-quit"}"#).is_err());
        assert!(GameMessage::decode("not json at all").is_err());
        assert!(GameMessage::decode(r#"{"message":"untagged"}"#).is_err());
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let msg = GameMessage::decode(r#"{"type":"game-alert"}"#).unwrap();
        assert_eq!(
            msg,
            GameMessage::Alert {
                message: String::new()
            }
        );

        let msg = GameMessage::decode(r#"{"type":"game-status"}"#).unwrap();
        assert_eq!(
            msg,
            GameMessage::Status {
                status: String::new(),
                data: Value::Null
            }
        );
    }

    #[test]
    fn wire_shape_round_trips() {
        let msg = GameMessage::Status {
            status: STATUS_SCORE_UPDATE.to_string(),
            data: json!({"text": "进度:5"}),
        };
        let raw = serde_json::to_string(&msg).unwrap();
        assert!(raw.contains(r#""type":"game-status""#));
        assert_eq!(GameMessage::decode(&raw).unwrap(), msg);
    }
}
