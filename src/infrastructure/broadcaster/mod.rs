//! Broadcast router implementations.

mod websocket;

pub use websocket::WebSocketBroadcaster;
