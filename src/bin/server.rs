//! Room-scoped WebSocket chat relay server.
//!
//! Relays messages between clients in the same room, with presence
//! notifications, typing indicators, and recent-history replay on join.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sala-server
//! cargo run --bin sala-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use sala::{
    common::logger::setup_logger,
    domain::{RoomName, RoomRegistry},
    infrastructure::{broadcaster::WebSocketBroadcaster, store::InMemoryMessageStore},
    ui::Server,
    usecase::{
        ConnectUseCase, DisconnectUseCase, GetRecentMessagesUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase, TypingUseCase,
    },
};

/// Room name every client can rely on existing.
const DEFAULT_ROOM: &str = "general";

#[derive(Parser, Debug)]
#[command(name = "sala-server")]
#[command(about = "Room-scoped WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. RoomRegistry + MessageStore
    // 2. Broadcaster
    // 3. UseCases
    // 4. Server

    // 1. Registry with the default room pre-registered, and the message log
    let mut initial_registry = RoomRegistry::new();
    initial_registry.register_room(RoomName::new(DEFAULT_ROOM).expect("default room name is valid"));
    let registry = Arc::new(Mutex::new(initial_registry));
    tracing::info!("Room '{}' registered", DEFAULT_ROOM);
    let store = Arc::new(InMemoryMessageStore::new());

    // 2. Broadcaster (WebSocket implementation)
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 3. Create UseCases
    let connect_usecase = Arc::new(ConnectUseCase::new(broadcaster.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        store.clone(),
        broadcaster.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(store.clone(), broadcaster.clone()));
    let typing_usecase = Arc::new(TypingUseCase::new(broadcaster.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone(), broadcaster.clone()));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(registry.clone(), broadcaster.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_recent_messages_usecase = Arc::new(GetRecentMessagesUseCase::new(store.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_usecase,
        join_room_usecase,
        send_message_usecase,
        typing_usecase,
        leave_room_usecase,
        disconnect_usecase,
        get_rooms_usecase,
        get_recent_messages_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
