//! UseCase: タイピング通知処理
//!
//! タイピングシグナルは永続化されない一時イベントで、送信者以外の
//! 現在の購読者にのみ配送されます。後から参加したセッションが過去の
//! シグナルを受け取ることはありません。

use std::sync::Arc;

use crate::domain::{Broadcaster, Session};

/// タイピング通知のユースケース
pub struct TypingUseCase {
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl TypingUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// タイピングイベントを送信者以外のルームメンバーに配送
    ///
    /// # Returns
    ///
    /// 配送した場合は `true`。未参加セッションからのシグナルは無視され
    /// `false` を返す。
    pub async fn execute(&self, session: &Session, content: &str) -> bool {
        let Some(membership) = session.membership() else {
            tracing::debug!(
                "Ignoring typing signal from unjoined connection '{}'",
                session.id()
            );
            return false;
        };

        self.broadcaster
            .publish(&membership.room, content, Some(session.id()))
            .await;
        true
    }
}
