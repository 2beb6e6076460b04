//! UseCase: ルーム一覧取得（HTTP API 用）

use crate::domain::RoomName;

use super::SharedRegistry;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Registry（既知ルームの管理元）
    registry: SharedRegistry,
}

impl GetRoomsUseCase {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// 既知のルーム名一覧を取得（事前登録分と参加実績のあるルーム）
    pub async fn execute(&self) -> Vec<RoomName> {
        let registry = self.registry.lock().await;
        registry.known_rooms()
    }
}
