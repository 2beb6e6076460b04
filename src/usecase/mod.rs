//! UseCase layer: one operation of the connection session state machine
//! per use case, plus the read-only queries behind the HTTP API.
//!
//! Use cases depend on the domain interfaces (`MessageStore`,
//! `Broadcaster`) and the shared `RoomRegistry`, never on the transport.

mod connect;
mod disconnect;
mod error;
mod get_recent_messages;
mod get_rooms;
mod join_room;
mod leave_room;
mod outcome;
mod send_message;
mod typing;

pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::SendMessageError;
pub use get_recent_messages::GetRecentMessagesUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use outcome::{JoinOutcome, RoomDeparture};
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;

/// The registry shared by all connection tasks, behind a single exclusive
/// lock so every membership operation appears atomic to observers.
pub type SharedRegistry = std::sync::Arc<tokio::sync::Mutex<crate::domain::RoomRegistry>>;
