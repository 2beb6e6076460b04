//! Value objects for identities, room names and message bodies.
//!
//! Client-supplied strings are validated once at the edge and carried
//! through the rest of the system as typed values.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

/// Maximum length (chars) for usernames and room names.
pub(super) const MAX_NAME_LEN: usize = 64;

/// Maximum length (chars) for a single chat message.
pub(super) const MAX_MESSAGE_LEN: usize = 2000;

/// An opaque, case-sensitive identity supplied by the client at join time.
///
/// Not verified for uniqueness or authenticity; two live connections may
/// legitimately share the same username in the same room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Create a validated username. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(DomainError::UsernameTooLong(len));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The name of a room, the scope for broadcast and presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    /// Create a validated room name. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(DomainError::RoomNameTooLong(len));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The body of a chat message.
///
/// A message that is empty after trimming is rejected here; the send
/// operation treats that rejection as a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        let len = trimmed.chars().count();
        if len > MAX_MESSAGE_LEN {
            return Err(DomainError::MessageTooLong(len));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Stable identifier for one live transport connection, issued when the
/// connection is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
