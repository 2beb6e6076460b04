//! インメモリ MessageStore 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! ルームごとの追記専用 Vec をストレージとして使用します。
//!
//! 永続化機構（ファイル・DBMS）への差し替えはこの trait の別実装として
//! 行う想定で、コアはストレージ形式に依存しません。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{MessageStore, MessageText, RoomName, StoreError, StoredMessage, Username};

/// In-memory, per-room append-only message log.
///
/// The mutex serializes appends, which makes append order total per room;
/// timestamps are clamped to be non-decreasing within a room so that the
/// assigned timestamp order always agrees with append order.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    rooms: Mutex<HashMap<RoomName, Vec<StoredMessage>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_timestamp(log: &[StoredMessage]) -> DateTime<Utc> {
        let now = Utc::now();
        match log.last() {
            // The system clock may step backwards; per-room timestamp
            // order must still agree with append order.
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(
        &self,
        room: RoomName,
        username: Username,
        text: MessageText,
    ) -> Result<StoredMessage, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let log = rooms.entry(room.clone()).or_default();

        let message = StoredMessage {
            username,
            text,
            room,
            timestamp: Self::next_timestamp(log),
        };
        log.push(message.clone());

        Ok(message)
    }

    async fn recent(&self, room: RoomName, limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
        let rooms = self.rooms.lock().await;
        let Some(log) = rooms.get(&room) else {
            return Ok(Vec::new());
        };

        let start = log.len().saturating_sub(limit);
        Ok(log[start..].to_vec())
    }
}
