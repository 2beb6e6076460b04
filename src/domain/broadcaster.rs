//! Broadcast router interface.
//!
//! Delivers an already-serialized event to the set of connections
//! currently subscribed to a room. The WebSocket-backed implementation
//! lives in the infrastructure layer; the use case layer depends only on
//! this trait.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::{ConnectionId, RoomName};

/// Outbound channel for one connection. The task handling the connection
/// drains this channel into its WebSocket sink, preserving the
/// single-writer-per-connection-output discipline.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Failure to deliver directly to one connection.
///
/// Only surfaced by [`Broadcaster::push_to`]; room-wide publication is
/// fire-and-forget per recipient and never reports failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),

    #[error("failed to push to connection '{0}': {1}")]
    PushFailed(ConnectionId, String),
}

/// Fan-out of serialized events to room subscribers.
///
/// The router owns the reverse index from room to live connections;
/// keeping that index correct under concurrent join/leave/disconnect is
/// its principal responsibility.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Register a connection's outbound channel. Called once when the
    /// transport accepts the connection.
    async fn register(&self, conn: ConnectionId, sender: PusherChannel);

    /// Drop a connection's channel and every room subscription it holds.
    /// Idempotent and safe mid-join.
    async fn unregister(&self, conn: ConnectionId);

    /// Subscribe a connection to a room's broadcasts.
    async fn subscribe(&self, conn: ConnectionId, room: RoomName);

    /// Remove one room subscription. A no-op if the connection was not
    /// subscribed.
    async fn unsubscribe(&self, conn: ConnectionId, room: &RoomName);

    /// Deliver to a single connection (history replay, member snapshot).
    async fn push_to(&self, conn: ConnectionId, content: &str) -> Result<(), BroadcastError>;

    /// Deliver to every connection subscribed to `room`, skipping
    /// `exclude` if supplied. A dead recipient is logged and skipped;
    /// failures never propagate to the publisher or other recipients.
    async fn publish(&self, room: &RoomName, content: &str, exclude: Option<ConnectionId>);
}
