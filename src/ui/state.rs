//! Server state shared by the HTTP and WebSocket handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, GetRecentMessagesUseCase, GetRoomsUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, SendMessageUseCase, TypingUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectUseCase（接続受付のユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// TypingUseCase（タイピング通知のユースケース）
    pub typing_usecase: Arc<TypingUseCase>,
    /// LeaveRoomUseCase（ルーム退室のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRecentMessagesUseCase（直近メッセージ取得のユースケース）
    pub get_recent_messages_usecase: Arc<GetRecentMessagesUseCase>,
}
