//! Wire-protocol DTOs.

pub mod websocket;
