//! UI layer: the WebSocket/HTTP server surface.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::websocket::handle_event;
pub use server::Server;
