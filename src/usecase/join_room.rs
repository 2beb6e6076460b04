//! UseCase: ルーム参加処理
//!
//! セッションの join 操作。別ルームに参加中の場合は暗黙の退室を先に
//! 行ってから新しいルームに参加します。これにより「セッションは同時に
//! 最大1ルームにのみ所属する」という不変条件が、Registry 側に切り替え
//! 専用の操作を持たずに保たれます。

use std::sync::Arc;

use crate::domain::{
    BroadcastError, Broadcaster, ConnectionId, MessageStore, RECENT_HISTORY_LIMIT, RoomName,
    Session, Username,
};

use super::SharedRegistry;
use super::outcome::{JoinOutcome, RoomDeparture};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（プレゼンスの唯一の書き込み元）
    registry: SharedRegistry,
    /// MessageStore（履歴リプレイ用の永続ストアの抽象化）
    store: Arc<dyn MessageStore>,
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: SharedRegistry,
        store: Arc<dyn MessageStore>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            registry,
            store,
            broadcaster,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 参加する接続のセッション（この接続のタスクのみが書き込む）
    /// * `username` - 参加時に名乗るユーザー名
    /// * `room` - 参加先のルーム
    ///
    /// # Returns
    ///
    /// 参加結果（暗黙退室の通知対象、参加後のメンバー、リプレイする履歴）。
    /// 参加自体は失敗しない。履歴の取得に失敗した場合は警告を記録し、
    /// 空の履歴でリプレイする。
    pub async fn execute(
        &self,
        session: &mut Session,
        username: Username,
        room: RoomName,
    ) -> JoinOutcome {
        // 1. 別ルーム（または別名義）で参加中なら、先に暗黙の退室を行う
        let departed = match session.clear_membership() {
            Some(old) if old.username == username && old.room == room => {
                // 同一ルーム・同一名義の再参加はプレゼンス上は冪等
                None
            }
            Some(old) => {
                let remaining = {
                    let mut registry = self.registry.lock().await;
                    registry.leave(&old.room, &old.username)
                };
                if old.room != room {
                    self.broadcaster.unsubscribe(session.id(), &old.room).await;
                }
                // remaining が None の場合は切断処理と競合して既に除去済み。
                // 正当な no-op であり、通知は不要。
                remaining.map(|remaining| RoomDeparture {
                    username: old.username,
                    room: old.room,
                    remaining,
                })
            }
            None => None,
        };

        // 2. Registry に参加を記録し、参加後のスナップショットを得る
        let members = {
            let mut registry = self.registry.lock().await;
            registry.join(&room, &username)
        };

        // 3. Broadcaster の逆引きインデックスに購読を登録
        self.broadcaster.subscribe(session.id(), room.clone()).await;

        // 4. リプレイ用の直近履歴を取得
        let history = match self
            .store
            .recent(room.clone(), RECENT_HISTORY_LIMIT)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("Failed to load history for room '{}': {}", room, e);
                Vec::new()
            }
        };

        session.set_membership(username.clone(), room.clone());
        tracing::info!("'{}' joined room '{}'", username, room);

        JoinOutcome {
            departed,
            members,
            history,
        }
    }

    /// 参加したセッション本人への個別送信（履歴リプレイ、メンバー一覧）
    pub async fn deliver_to_session(
        &self,
        conn: ConnectionId,
        content: &str,
    ) -> Result<(), BroadcastError> {
        self.broadcaster.push_to(conn, content).await
    }

    /// ルームへのイベント配送（user-joined / 暗黙退室の user-left）
    pub async fn notify_room(
        &self,
        room: &RoomName,
        content: &str,
        exclude: Option<ConnectionId>,
    ) {
        self.broadcaster.publish(room, content, exclude).await;
    }
}
