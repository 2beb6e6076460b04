//! UseCase: 接続受付処理
//!
//! トランスポートが接続を受け付けた時点で呼ばれ、接続の outbound
//! チャンネルを Broadcaster に登録します。ルームへの参加はここでは
//! 行いません（セッションは未参加状態で開始する）。

use std::sync::Arc;

use crate::domain::{Broadcaster, PusherChannel, Session};

/// 接続受付のユースケース
pub struct ConnectUseCase {
    /// Broadcaster（イベント配送の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl ConnectUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 接続の outbound チャンネルを登録する
    pub async fn execute(&self, session: &Session, sender: PusherChannel) {
        self.broadcaster.register(session.id(), sender).await;
        tracing::info!("Connection '{}' accepted and registered", session.id());
    }
}
