//! UseCase: 明示的なルーム退室処理
//!
//! セッションを未参加状態に戻し、残りのメンバーへの通知内容を返します。

use std::sync::Arc;

use crate::domain::{Broadcaster, RoomName, Session};

use super::SharedRegistry;
use super::outcome::RoomDeparture;

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    /// Registry（プレゼンスの唯一の書き込み元）
    registry: SharedRegistry,
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl LeaveRoomUseCase {
    pub fn new(registry: SharedRegistry, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// ルーム退室を実行
    ///
    /// # Returns
    ///
    /// * `Some(RoomDeparture)` - 退室成功。残りのメンバーに通知する
    /// * `None` - 未参加セッション、または切断処理と競合して既に除去済み
    ///   （いずれも正当な no-op で、通知は不要）
    pub async fn execute(&self, session: &mut Session) -> Option<RoomDeparture> {
        let old = session.clear_membership()?;

        let remaining = {
            let mut registry = self.registry.lock().await;
            registry.leave(&old.room, &old.username)
        };
        self.broadcaster.unsubscribe(session.id(), &old.room).await;

        tracing::info!("'{}' left room '{}'", old.username, old.room);
        remaining.map(|remaining| RoomDeparture {
            username: old.username,
            room: old.room,
            remaining,
        })
    }

    /// 退室通知を残りのメンバーに配送
    pub async fn notify_room(&self, room: &RoomName, content: &str) {
        // 退室者は既に購読解除済みなので exclude 指定は不要
        self.broadcaster.publish(room, content, None).await;
    }
}
