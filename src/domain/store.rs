//! Message store interface.
//!
//! The durable, append-only per-room message log is an external
//! collaborator; the domain defines the interface it consumes and the
//! infrastructure layer provides the implementation.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::StoredMessage;
use super::value_object::{MessageText, RoomName, Username};

/// How many messages are replayed to a client when it joins a room, and
/// the bound on the HTTP history endpoint.
pub const RECENT_HISTORY_LIMIT: usize = 50;

/// Failure of the durable store to accept or serve a request.
///
/// A failed append fails the single send operation that triggered it (the
/// message is not broadcast); it never terminates the connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Durable, ordered, append-only message log per room.
///
/// Append order must be total per room: no two appends for the same room
/// may be reordered relative to each other, even under concurrent
/// senders. Cross-room ordering is unconstrained.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message, assigning the authoritative server-side
    /// timestamp, and return the stored record.
    async fn append(
        &self,
        room: RoomName,
        username: Username,
        text: MessageText,
    ) -> Result<StoredMessage, StoreError>;

    /// The most recent `limit` messages for a room, oldest first. Empty
    /// for a room with no history.
    async fn recent(&self, room: RoomName, limit: usize) -> Result<Vec<StoredMessage>, StoreError>;
}
