//! Results returned by session use cases for the coordinator to publish.

use crate::domain::{RoomName, StoredMessage, Username};

/// A username left a room (explicitly, implicitly on a room switch, or
/// via disconnect), and the remaining members should be notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDeparture {
    pub username: Username,
    pub room: RoomName,
    /// Post-removal member snapshot for the `user-left` payload.
    pub remaining: Vec<Username>,
}

/// Result of a join: what to replay to the joining session and what to
/// announce to the rooms involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Set when the join implicitly left a previous room (or replaced the
    /// session's previous identity) and that room must be notified.
    pub departed: Option<RoomDeparture>,
    /// Post-join member snapshot of the joined room.
    pub members: Vec<Username>,
    /// Recent history to replay privately, oldest first.
    pub history: Vec<StoredMessage>,
}
