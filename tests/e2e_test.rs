//! End-to-end tests against a live server over real WebSocket and HTTP
//! connections.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::Mutex, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use sala::{
    domain::{RoomName, RoomRegistry},
    infrastructure::{broadcaster::WebSocketBroadcaster, store::InMemoryMessageStore},
    ui::Server,
    usecase::{
        ConnectUseCase, DisconnectUseCase, GetRecentMessagesUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase, TypingUseCase,
    },
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Start a server on the given port and wait until it answers health
/// checks.
async fn spawn_server(port: u16) {
    let mut initial_registry = RoomRegistry::new();
    initial_registry.register_room(RoomName::new("general").unwrap());
    let registry = Arc::new(Mutex::new(initial_registry));
    let store = Arc::new(InMemoryMessageStore::new());
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    let server = Server::new(
        Arc::new(ConnectUseCase::new(broadcaster.clone())),
        Arc::new(JoinRoomUseCase::new(
            registry.clone(),
            store.clone(),
            broadcaster.clone(),
        )),
        Arc::new(SendMessageUseCase::new(store.clone(), broadcaster.clone())),
        Arc::new(TypingUseCase::new(broadcaster.clone())),
        Arc::new(LeaveRoomUseCase::new(registry.clone(), broadcaster.clone())),
        Arc::new(DisconnectUseCase::new(registry.clone(), broadcaster.clone())),
        Arc::new(GetRoomsUseCase::new(registry.clone())),
        Arc::new(GetRecentMessagesUseCase::new(store.clone())),
    );

    tokio::spawn(async move {
        if let Err(e) = server.run("127.0.0.1".to_string(), port).await {
            panic!("server failed: {}", e);
        }
    });

    let client = reqwest::Client::new();
    let health_url = format!("http://127.0.0.1:{}/api/health", port);
    for _ in 0..50 {
        if let Ok(resp) = client.get(&health_url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server did not become healthy on port {}", port);
}

async fn ws_connect(port: u16) -> WsStream {
    let (ws, _) = connect_async(format!("ws://127.0.0.1:{}/ws", port))
        .await
        .expect("WebSocket connect failed");
    ws
}

async fn send_json(ws: &mut WsStream, payload: &str) {
    ws.send(Message::text(payload)).await.expect("send failed");
}

/// Receive the next text frame as JSON, skipping protocol frames.
async fn recv_json(ws: &mut WsStream) -> serde_json::Value {
    loop {
        let msg = timeout(Duration::from_secs(3), ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("WebSocket error");
        if msg.is_text() {
            let text = msg.into_text().expect("text frame");
            return serde_json::from_str(text.as_str()).expect("frame should be JSON");
        }
    }
}

#[tokio::test]
async fn test_http_api_reports_health_and_rooms() {
    // テスト項目: HTTP API でヘルスチェックとルーム一覧が取得できる
    // given (前提条件):
    let port = 18090;
    spawn_server(port).await;
    let client = reqwest::Client::new();

    // when (操作):
    let health: serde_json::Value = client
        .get(format!("http://127.0.0.1:{}/api/health", port))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rooms: Vec<String> = client
        .get(format!("http://127.0.0.1:{}/api/rooms", port))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(health["status"], "ok");
    assert_eq!(rooms, vec!["general".to_string()]);
}

#[tokio::test]
async fn test_chat_flow_over_live_sockets() {
    // テスト項目: 実ソケット越しに参加・通知・メッセージ配送が動作する
    // given (前提条件):
    let port = 18091;
    spawn_server(port).await;

    // when (操作): alice が general に参加する
    let mut alice = ws_connect(port).await;
    send_json(
        &mut alice,
        r#"{"type":"join-room","username":"alice","room":"general"}"#,
    )
    .await;

    // then (期待する結果): 空の履歴とメンバー一覧が届く
    let history = recv_json(&mut alice).await;
    assert_eq!(history["type"], "previous-messages");
    assert_eq!(history["messages"], serde_json::json!([]));
    let members = recv_json(&mut alice).await;
    assert_eq!(members["type"], "users-in-room");
    assert_eq!(members["users"], serde_json::json!(["alice"]));

    // when (操作): bob が参加し、alice がメッセージを送る
    let mut bob = ws_connect(port).await;
    send_json(
        &mut bob,
        r#"{"type":"join-room","username":"bob","room":"general"}"#,
    )
    .await;

    let joined = recv_json(&mut alice).await;
    assert_eq!(joined["type"], "user-joined");
    assert_eq!(joined["username"], "bob");
    assert_eq!(joined["users"], serde_json::json!(["alice", "bob"]));

    // bob 側の参加レスポンスを読み捨てる
    assert_eq!(recv_json(&mut bob).await["type"], "previous-messages");
    assert_eq!(recv_json(&mut bob).await["type"], "users-in-room");

    send_json(
        &mut alice,
        r#"{"type":"send-message","message":"hello from alice"}"#,
    )
    .await;

    // then (期待する結果): 送信者を含む両者にメッセージが届く
    for ws in [&mut alice, &mut bob] {
        let received = recv_json(ws).await;
        assert_eq!(received["type"], "receive-message");
        assert_eq!(received["username"], "alice");
        assert_eq!(received["message"], "hello from alice");
        assert_eq!(received["room"], "general");
    }

    // when (操作): bob が切断する
    drop(bob);

    // then (期待する結果): alice に退室通知が届く
    let left = recv_json(&mut alice).await;
    assert_eq!(left["type"], "user-left");
    assert_eq!(left["username"], "bob");
    assert_eq!(left["users"], serde_json::json!(["alice"]));

    // メッセージは履歴 API からも見える
    let client = reqwest::Client::new();
    let messages: serde_json::Value = client
        .get(format!("http://127.0.0.1:{}/api/messages/general", port))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(messages[0]["message"], "hello from alice");
}
