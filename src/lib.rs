//! Room-scoped WebSocket chat relay library.
//!
//! Clients join named rooms, exchange broadcast messages, see typing
//! indicators and observe join/leave presence changes. Recent message
//! history is replayed to a client when it joins a room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
