//! WebSocket を使った Broadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの outbound チャンネル（`UnboundedSender`）の管理
//! - ルーム → 購読中接続の逆引きインデックスの維持
//! - ルーム内の購読者へのファンアウト（publish）と個別送信（push_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、配送だけを担当します。
//! sender マップと購読インデックスは同一の Mutex 配下にあり、
//! 並行する join/leave/disconnect の下でも互いに矛盾しません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastError, Broadcaster, ConnectionId, PusherChannel, RoomName};

#[derive(Debug, Default)]
struct RouterIndex {
    senders: HashMap<ConnectionId, PusherChannel>,
    subscribers: HashMap<RoomName, HashSet<ConnectionId>>,
}

/// WebSocket-backed broadcast router.
#[derive(Debug, Default)]
pub struct WebSocketBroadcaster {
    index: Mutex<RouterIndex>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn subscriber_count(&self, room: &RoomName) -> usize {
        let index = self.index.lock().await;
        index.subscribers.get(room).map_or(0, HashSet::len)
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn register(&self, conn: ConnectionId, sender: PusherChannel) {
        let mut index = self.index.lock().await;
        index.senders.insert(conn, sender);
        tracing::debug!("Connection '{}' registered to broadcaster", conn);
    }

    async fn unregister(&self, conn: ConnectionId) {
        let mut index = self.index.lock().await;
        index.senders.remove(&conn);
        // Sweep every room index entry, not just the current room, so the
        // cleanup is safe even when membership was only partially
        // established before the disconnect.
        index.subscribers.retain(|_, conns| {
            conns.remove(&conn);
            !conns.is_empty()
        });
        tracing::debug!("Connection '{}' unregistered from broadcaster", conn);
    }

    async fn subscribe(&self, conn: ConnectionId, room: RoomName) {
        let mut index = self.index.lock().await;
        index.subscribers.entry(room).or_default().insert(conn);
    }

    async fn unsubscribe(&self, conn: ConnectionId, room: &RoomName) {
        let mut index = self.index.lock().await;
        if let Some(conns) = index.subscribers.get_mut(room) {
            conns.remove(&conn);
            if conns.is_empty() {
                index.subscribers.remove(room);
            }
        }
    }

    async fn push_to(&self, conn: ConnectionId, content: &str) -> Result<(), BroadcastError> {
        let index = self.index.lock().await;

        let sender = index
            .senders
            .get(&conn)
            .ok_or(BroadcastError::ConnectionNotFound(conn))?;
        sender
            .send(content.to_string())
            .map_err(|e| BroadcastError::PushFailed(conn, e.to_string()))?;

        tracing::debug!("Pushed message to connection '{}'", conn);
        Ok(())
    }

    async fn publish(&self, room: &RoomName, content: &str, exclude: Option<ConnectionId>) {
        let index = self.index.lock().await;

        let Some(conns) = index.subscribers.get(room) else {
            return;
        };

        for conn in conns {
            if Some(*conn) == exclude {
                continue;
            }
            match index.senders.get(conn) {
                // 配送失敗は受信者単位で許容し、他の受信者への配送を続ける
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push to connection '{}': {}", conn, e);
                    }
                }
                None => {
                    tracing::warn!("Connection '{}' has no sender, skipping", conn);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn room(name: &str) -> RoomName {
        RoomName::new(name).unwrap()
    }

    async fn connect(
        broadcaster: &WebSocketBroadcaster,
    ) -> (ConnectionId, UnboundedReceiver<String>) {
        let conn = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        broadcaster.register(conn, tx).await;
        (conn, rx)
    }

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        // テスト項目: ルームの全購読者にイベントが配送される
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, mut alice_rx) = connect(&broadcaster).await;
        let (bob, mut bob_rx) = connect(&broadcaster).await;
        broadcaster.subscribe(alice, room("general")).await;
        broadcaster.subscribe(bob, room("general")).await;

        // when (操作):
        broadcaster.publish(&room("general"), "hello", None).await;

        // then (期待する結果):
        assert_eq!(alice_rx.recv().await, Some("hello".to_string()));
        assert_eq!(bob_rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_publish_excludes_sender() {
        // テスト項目: exclude 指定された接続には配送されない（typing など）
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, mut alice_rx) = connect(&broadcaster).await;
        let (bob, mut bob_rx) = connect(&broadcaster).await;
        broadcaster.subscribe(alice, room("general")).await;
        broadcaster.subscribe(bob, room("general")).await;

        // when (操作):
        broadcaster
            .publish(&room("general"), "typing", Some(alice))
            .await;

        // then (期待する結果): bob のみ受信
        assert_eq!(bob_rx.recv().await, Some("typing".to_string()));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_is_scoped_to_room() {
        // テスト項目: 別ルームの購読者には配送されない
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, mut alice_rx) = connect(&broadcaster).await;
        let (bob, mut bob_rx) = connect(&broadcaster).await;
        broadcaster.subscribe(alice, room("general")).await;
        broadcaster.subscribe(bob, room("random")).await;

        // when (操作):
        broadcaster.publish(&room("general"), "hello", None).await;

        // then (期待する結果):
        assert_eq!(alice_rx.recv().await, Some("hello".to_string()));
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_survives_dead_recipient() {
        // テスト項目: 受信側チャンネルが閉じていても他の受信者へ配送される
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, alice_rx) = connect(&broadcaster).await;
        let (bob, mut bob_rx) = connect(&broadcaster).await;
        broadcaster.subscribe(alice, room("general")).await;
        broadcaster.subscribe(bob, room("general")).await;
        drop(alice_rx); // alice 側のトランスポートが既に閉じた状況

        // when (操作):
        broadcaster.publish(&room("general"), "hello", None).await;

        // then (期待する結果): エラーにならず bob は受信する
        assert_eq!(bob_rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // テスト項目: 未登録の接続への個別送信はエラーを返す
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let conn = ConnectionId::new();

        // when (操作):
        let result = broadcaster.push_to(conn, "hello").await;

        // then (期待する結果):
        assert_eq!(result, Err(BroadcastError::ConnectionNotFound(conn)));
    }

    #[tokio::test]
    async fn test_unregister_sweeps_all_subscriptions() {
        // テスト項目: unregister で全ルームの購読が除去され、以後配送されない
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, mut alice_rx) = connect(&broadcaster).await;
        broadcaster.subscribe(alice, room("general")).await;
        broadcaster.subscribe(alice, room("random")).await;

        // when (操作):
        broadcaster.unregister(alice).await;

        // then (期待する結果):
        assert_eq!(broadcaster.subscriber_count(&room("general")).await, 0);
        assert_eq!(broadcaster.subscriber_count(&room("random")).await, 0);
        broadcaster.publish(&room("general"), "hello", None).await;
        assert!(alice_rx.try_recv().is_err());

        // 再度 unregister しても安全（冪等）
        broadcaster.unregister(alice).await;
    }

    #[tokio::test]
    async fn test_unsubscribe_is_noop_for_nonsubscriber() {
        // テスト項目: 購読していないルームからの unsubscribe は no-op
        // given (前提条件):
        let broadcaster = WebSocketBroadcaster::new();
        let (alice, _alice_rx) = connect(&broadcaster).await;

        // when (操作):
        broadcaster.unsubscribe(alice, &room("general")).await;

        // then (期待する結果): パニックせず、状態も変化しない
        assert_eq!(broadcaster.subscriber_count(&room("general")).await, 0);
    }
}
