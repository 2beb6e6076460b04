//! Domain entities: stored messages and per-connection sessions.

use chrono::{DateTime, Utc};

use super::value_object::{ConnectionId, MessageText, RoomName, Username};

/// A message accepted by the message store.
///
/// The timestamp is assigned by the store at the moment of acceptance,
/// never supplied by the client, so it defines the authoritative
/// per-room ordering. Stored messages are immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub username: Username,
    pub text: MessageText,
    pub room: RoomName,
    pub timestamp: DateTime<Utc>,
}

/// The identity and room a joined session currently claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub username: Username,
    pub room: RoomName,
}

/// Server-side state for one live connection.
///
/// A session starts unjoined; identity and room are set together on the
/// first join and reassigned on a room switch. A session is a member of
/// at most one room at a time. The session is owned and mutated only by
/// the task handling its connection's events.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    membership: Option<Membership>,
}

impl Session {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            membership: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }

    pub fn is_joined(&self) -> bool {
        self.membership.is_some()
    }

    /// Record a join, returning the membership it replaces (if any).
    pub fn set_membership(&mut self, username: Username, room: RoomName) -> Option<Membership> {
        self.membership.replace(Membership { username, room })
    }

    /// Clear the session back to the unjoined state, returning the old
    /// membership (if any).
    pub fn clear_membership(&mut self) -> Option<Membership> {
        self.membership.take()
    }
}
