//! Domain layer: value objects, entities and the interfaces the
//! use case layer depends on.
//!
//! The concrete implementations of [`MessageStore`] and [`Broadcaster`]
//! live in the infrastructure layer (dependency inversion).

mod broadcaster;
mod entity;
mod error;
mod registry;
mod store;
mod value_object;

pub use broadcaster::{BroadcastError, Broadcaster, PusherChannel};
pub use entity::{Membership, Session, StoredMessage};
pub use error::DomainError;
pub use registry::RoomRegistry;
pub use store::{MessageStore, RECENT_HISTORY_LIMIT, StoreError};
pub use value_object::{ConnectionId, MessageText, RoomName, Username};

#[cfg(test)]
pub use store::MockMessageStore;
