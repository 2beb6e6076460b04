//! WebSocket wire protocol: tagged client/server event DTOs.
//!
//! Every transport event is a closed set of variants with explicit
//! required fields; a payload that does not parse into one of them is
//! logged and ignored rather than trusted at runtime.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::StoredMessage;

/// Events sent by clients, tagged by a `type` field.
///
/// Only the fields the server consumes are declared; the `username` and
/// `room` fields clients also put on `send-message`, `typing` and
/// `leave-room` payloads are ignored because the session, not the
/// payload, is authoritative for the sender's identity and current room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom {
        username: String,
        room: String,
    },
    SendMessage {
        message: String,
    },
    Typing {
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
    LeaveRoom,
}

/// Events sent to clients, tagged by a `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Recent history replay, delivered privately on join, oldest first.
    PreviousMessages { messages: Vec<MessageDto> },
    /// A stored message fanned out to every member of the room,
    /// including the sender (the sender's UI reflects the authoritative
    /// timestamp, not a local echo).
    ReceiveMessage(MessageDto),
    UserJoined { username: String, users: Vec<String> },
    UserLeft { username: String, users: Vec<String> },
    /// Current member snapshot, delivered privately on join.
    UsersInRoom { users: Vec<String> },
    UserTyping {
        username: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}

impl ServerEvent {
    /// Serialize for the wire. These DTOs contain only strings, vectors
    /// and booleans, so serialization cannot fail.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ServerEvent serialization cannot fail")
    }
}

/// A stored message as it appears on the wire and in the HTTP history
/// endpoint. Timestamps are RFC 3339 UTC strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub username: String,
    pub message: String,
    pub room: String,
    pub timestamp: String,
}

impl From<StoredMessage> for MessageDto {
    fn from(message: StoredMessage) -> Self {
        Self {
            username: message.username.into_string(),
            message: message.text.into_string(),
            room: message.room.into_string(),
            timestamp: message
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
