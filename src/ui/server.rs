//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, GetRecentMessagesUseCase, GetRoomsUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, SendMessageUseCase, TypingUseCase,
};

use super::{
    handler::{
        http::{get_recent_messages, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     // ...
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectUseCase（接続受付のユースケース）
    connect_usecase: Arc<ConnectUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// TypingUseCase（タイピング通知のユースケース）
    typing_usecase: Arc<TypingUseCase>,
    /// LeaveRoomUseCase（ルーム退室のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    disconnect_usecase: Arc<DisconnectUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRecentMessagesUseCase（直近メッセージ取得のユースケース）
    get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_usecase: Arc<ConnectUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        typing_usecase: Arc<TypingUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
    ) -> Self {
        Self {
            connect_usecase,
            join_room_usecase,
            send_message_usecase,
            typing_usecase,
            leave_room_usecase,
            disconnect_usecase,
            get_rooms_usecase,
            get_recent_messages_usecase,
        }
    }

    /// Run the WebSocket chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_usecase: self.connect_usecase,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            typing_usecase: self.typing_usecase,
            leave_room_usecase: self.leave_room_usecase,
            disconnect_usecase: self.disconnect_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            get_recent_messages_usecase: self.get_recent_messages_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/messages/{room}", get(get_recent_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
