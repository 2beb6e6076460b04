//! UseCase: 切断処理
//!
//! トランスポート起点の終端処理。参加の成立途中で切断が起きても安全な
//! よう、Broadcaster からの登録解除は無条件に行い、Registry からは
//! 記録されている全ルームからユーザー名を除去します（冪等）。

use std::sync::Arc;

use crate::domain::{Broadcaster, RoomName, Session};

use super::SharedRegistry;
use super::outcome::RoomDeparture;

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Registry（プレゼンスの唯一の書き込み元）
    registry: SharedRegistry,
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl DisconnectUseCase {
    pub fn new(registry: SharedRegistry, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// メンバーシップが変化したルームごとの通知内容。未参加セッションの
    /// 切断では空になる。
    pub async fn execute(&self, session: &mut Session) -> Vec<RoomDeparture> {
        // 先に配送を止める。以後この接続への配送は試みられない
        self.broadcaster.unregister(session.id()).await;

        let Some(old) = session.clear_membership() else {
            tracing::info!("Connection '{}' disconnected (unjoined)", session.id());
            return Vec::new();
        };

        let affected = {
            let mut registry = self.registry.lock().await;
            registry.remove_from_all(&old.username)
        };

        tracing::info!(
            "Connection '{}' ('{}') disconnected, removed from {} room(s)",
            session.id(),
            old.username,
            affected.len()
        );

        affected
            .into_iter()
            .map(|(room, remaining)| RoomDeparture {
                username: old.username.clone(),
                room,
                remaining,
            })
            .collect()
    }

    /// 退室通知を残りのメンバーに配送
    pub async fn notify_room(&self, room: &RoomName, content: &str) {
        self.broadcaster.publish(room, content, None).await;
    }
}
