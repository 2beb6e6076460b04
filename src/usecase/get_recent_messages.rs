//! UseCase: 直近メッセージ取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{MessageStore, RECENT_HISTORY_LIMIT, RoomName, StoreError, StoredMessage};

/// 直近メッセージ取得のユースケース
pub struct GetRecentMessagesUseCase {
    /// MessageStore（永続ストアの抽象化）
    store: Arc<dyn MessageStore>,
}

impl GetRecentMessagesUseCase {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// 指定ルームの直近メッセージを古い順で取得
    pub async fn execute(&self, room: RoomName) -> Result<Vec<StoredMessage>, StoreError> {
        self.store.recent(room, RECENT_HISTORY_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, Username};
    use crate::infrastructure::store::InMemoryMessageStore;

    #[tokio::test]
    async fn test_returns_room_history_oldest_first() {
        // テスト項目: ルームの履歴が古い順で返される
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new());
        let room = RoomName::new("general").unwrap();
        store
            .append(
                room.clone(),
                Username::new("alice").unwrap(),
                MessageText::new("first").unwrap(),
            )
            .await
            .unwrap();
        store
            .append(
                room.clone(),
                Username::new("bob").unwrap(),
                MessageText::new("second").unwrap(),
            )
            .await
            .unwrap();
        let usecase = GetRecentMessagesUseCase::new(store);

        // when (操作):
        let messages = usecase.execute(room).await.unwrap();

        // then (期待する結果):
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, MessageText::new("first").unwrap());
        assert_eq!(messages[1].text, MessageText::new("second").unwrap());
    }

    #[tokio::test]
    async fn test_unknown_room_returns_empty() {
        // テスト項目: 履歴のないルームでは空のリストが返される
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = GetRecentMessagesUseCase::new(store);

        // when (操作):
        let messages = usecase
            .execute(RoomName::new("nowhere").unwrap())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(messages.is_empty());
    }
}
