//! UseCase: メッセージ送信処理
//!
//! 参加中のセッションからのメッセージを永続ストアに追記し、ルームの
//! 全メンバー（送信者を含む）への配送対象となる保存済みメッセージを
//! 返します。送信者自身にも配送するのは、クライアント側の楽観的な
//! ローカルエコーではなく、ストアが割り当てた正式なタイムスタンプと
//! 順序を UI に反映させるためです。

use std::sync::Arc;

use crate::domain::{Broadcaster, MessageStore, MessageText, RoomName, Session, StoredMessage};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessageStore（永続ストアの抽象化）
    store: Arc<dyn MessageStore>,
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl SendMessageUseCase {
    pub fn new(store: Arc<dyn MessageStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(StoredMessage))` - 保存成功。呼び出し側がルーム全員に配送する
    /// * `Ok(None)` - 未参加セッション、または空メッセージによる silent no-op
    /// * `Err(SendMessageError)` - ストア書き込み失敗（配送してはならない）
    pub async fn execute(
        &self,
        session: &Session,
        text: String,
    ) -> Result<Option<StoredMessage>, SendMessageError> {
        // 1. 未参加セッションからの送信は無視（エラーではない）
        let Some(membership) = session.membership() else {
            tracing::debug!(
                "Ignoring message from unjoined connection '{}'",
                session.id()
            );
            return Ok(None);
        };

        // 2. 空メッセージは無視（エラーではない）
        let Ok(text) = MessageText::new(text) else {
            tracing::debug!("Ignoring empty message from '{}'", membership.username);
            return Ok(None);
        };

        // 3. ストアに追記し、正式なタイムスタンプ付きの記録を得る。
        //    失敗した場合は配送しない（履歴リプレイとの整合性を守る）
        let stored = self
            .store
            .append(
                membership.room.clone(),
                membership.username.clone(),
                text,
            )
            .await?;

        tracing::info!("[{}] {}: {}", stored.room, stored.username, stored.text.as_str());
        Ok(Some(stored))
    }

    /// 保存済みメッセージをルームの全メンバー（送信者を含む）に配送
    pub async fn broadcast_message(&self, room: &RoomName, content: &str) {
        self.broadcaster.publish(room, content, None).await;
    }
}
