//! Room registry: the authoritative in-memory mapping from room name to
//! the set of currently present member identities.
//!
//! The registry is a plain synchronous structure; callers share it behind
//! a single `tokio::sync::Mutex` so that every join/leave/disconnect
//! appears atomic and every returned snapshot reflects one consistent
//! point in the sequence of membership mutations.
//!
//! None of these operations fail: absence of a room or member is a
//! legitimate empty result, never an error.

use std::collections::{BTreeMap, BTreeSet};

use super::value_object::{RoomName, Username};

/// Per-room presence state plus the set of "known" room names served by
/// the room listing endpoint.
///
/// Presence is keyed by username, not by connection: joining a room with
/// a username already present is idempotent, and a leave removes the
/// username even if another connection still claims it.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    members: BTreeMap<RoomName, BTreeSet<Username>>,
    known_rooms: BTreeSet<RoomName>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a room name so it shows up in [`known_rooms`] before
    /// anyone has joined it.
    ///
    /// [`known_rooms`]: RoomRegistry::known_rooms
    pub fn register_room(&mut self, room: RoomName) {
        self.known_rooms.insert(room);
    }

    /// Add `username` to the room's member set and return the post-join
    /// snapshot. Idempotent if the username is already present. Marks the
    /// room as known.
    pub fn join(&mut self, room: &RoomName, username: &Username) -> Vec<Username> {
        self.known_rooms.insert(room.clone());
        let members = self.members.entry(room.clone()).or_default();
        members.insert(username.clone());
        members.iter().cloned().collect()
    }

    /// Remove `username` from the room's member set.
    ///
    /// Returns the post-removal snapshot, or `None` if the username was
    /// not a member (a legitimate race with a disconnect that already
    /// removed it, so there is nothing to notify).
    pub fn leave(&mut self, room: &RoomName, username: &Username) -> Option<Vec<Username>> {
        let members = self.members.get_mut(room)?;
        if !members.remove(username) {
            return None;
        }
        let snapshot = members.iter().cloned().collect();
        if members.is_empty() {
            // A room with no live members drops out of presence queries;
            // its history and "known" status persist.
            self.members.remove(room);
        }
        Some(snapshot)
    }

    /// Remove `username` from every room it is recorded in, returning the
    /// affected rooms with their post-removal snapshots.
    ///
    /// Normally a session is a member of exactly one room, but stale or
    /// duplicate entries are tolerated and swept here.
    pub fn remove_from_all(&mut self, username: &Username) -> Vec<(RoomName, Vec<Username>)> {
        let affected: Vec<RoomName> = self
            .members
            .iter()
            .filter(|(_, members)| members.contains(username))
            .map(|(room, _)| room.clone())
            .collect();

        affected
            .into_iter()
            .filter_map(|room| {
                let snapshot = self.leave(&room, username)?;
                Some((room, snapshot))
            })
            .collect()
    }

    /// Read-only presence snapshot for a room. Empty if the room has no
    /// live members.
    pub fn members_of(&self, room: &RoomName) -> Vec<Username> {
        self.members
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All room names known to the registry, pre-registered or joined at
    /// least once, sorted.
    pub fn known_rooms(&self) -> Vec<RoomName> {
        self.known_rooms.iter().cloned().collect()
    }
}
