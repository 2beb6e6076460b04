//! WebSocket connection handlers: the coordinator between the transport
//! and the session use cases.
//!
//! Each connection gets one task that reads its inbound events in
//! arrival order, so no two events for the same connection are processed
//! concurrently; across connections everything interleaves freely.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, RoomName, Session, Username},
    infrastructure::dto::websocket::{ClientEvent, MessageDto, ServerEvent},
    usecase::RoomDeparture,
};

use super::super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns the task that drains this connection's outbound channel into
/// its WebSocket sink.
///
/// All writes to the socket go through this single task, preserving the
/// single-writer-per-connection-output discipline.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let mut session = Session::new(ConnectionId::new());
    let (tx, rx) = mpsc::unbounded_channel();
    state.connect_usecase.execute(&session, tx).await;

    let mut send_task = pusher_loop(rx, sender);

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => handle_event(&state, &mut session, event).await,
                            Err(e) => {
                                // Malformed input: dropped, nothing stored
                                // or broadcast, connection stays up
                                tracing::warn!(
                                    "Ignoring malformed event from '{}': {}",
                                    session.id(),
                                    e
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Connection '{}' requested close", session.id());
                        break;
                    }
                    // Ping/pong is handled by the WebSocket protocol
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error on '{}': {}", session.id(), e);
                        break;
                    }
                    None => break,
                }
            }
            // Outbound sink closed; the connection is gone
            _ = &mut send_task => break,
        }
    }

    send_task.abort();

    // Cleanup runs unconditionally, even if the join was only partially
    // established when the connection dropped.
    let departures = state.disconnect_usecase.execute(&mut session).await;
    for departure in &departures {
        state
            .disconnect_usecase
            .notify_room(&departure.room, &user_left_event(departure).to_json())
            .await;
    }
}

/// Dispatch one inbound event to the session operation it maps to and
/// publish the resulting outbound events.
///
/// Public so integration tests can drive the full dispatch path without
/// a live socket.
pub async fn handle_event(state: &AppState, session: &mut Session, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { username, room } => {
            match (Username::new(username), RoomName::new(room)) {
                (Ok(username), Ok(room)) => handle_join(state, session, username, room).await,
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Ignoring join-room with invalid payload: {}", e);
                }
            }
        }
        ClientEvent::SendMessage { message } => {
            match state.send_message_usecase.execute(session, message).await {
                Ok(Some(stored)) => {
                    let room = stored.room.clone();
                    let event = ServerEvent::ReceiveMessage(MessageDto::from(stored));
                    // The sender receives the authoritative copy too
                    state
                        .send_message_usecase
                        .broadcast_message(&room, &event.to_json())
                        .await;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to send message from '{}': {}", session.id(), e);
                }
            }
        }
        ClientEvent::Typing { is_typing } => {
            let Some(membership) = session.membership() else {
                tracing::debug!("Ignoring typing signal from unjoined '{}'", session.id());
                return;
            };
            let event = ServerEvent::UserTyping {
                username: membership.username.as_str().to_string(),
                is_typing,
            };
            state.typing_usecase.execute(session, &event.to_json()).await;
        }
        ClientEvent::LeaveRoom => {
            if let Some(departure) = state.leave_room_usecase.execute(session).await {
                state
                    .leave_room_usecase
                    .notify_room(&departure.room, &user_left_event(&departure).to_json())
                    .await;
            }
        }
    }
}

async fn handle_join(state: &AppState, session: &mut Session, username: Username, room: RoomName) {
    let outcome = state
        .join_room_usecase
        .execute(session, username.clone(), room.clone())
        .await;

    // Notify the room that was implicitly left on a room switch
    if let Some(departed) = &outcome.departed {
        state
            .join_room_usecase
            .notify_room(&departed.room, &user_left_event(departed).to_json(), None)
            .await;
    }

    // Announce the join to the room's other members
    let joined = ServerEvent::UserJoined {
        username: username.as_str().to_string(),
        users: usernames(&outcome.members),
    };
    state
        .join_room_usecase
        .notify_room(&room, &joined.to_json(), Some(session.id()))
        .await;

    // Replay history and the member snapshot privately to the joiner
    let history = ServerEvent::PreviousMessages {
        messages: outcome.history.into_iter().map(MessageDto::from).collect(),
    };
    if let Err(e) = state
        .join_room_usecase
        .deliver_to_session(session.id(), &history.to_json())
        .await
    {
        tracing::warn!("Failed to replay history to '{}': {}", session.id(), e);
        return;
    }

    let users = ServerEvent::UsersInRoom {
        users: usernames(&outcome.members),
    };
    if let Err(e) = state
        .join_room_usecase
        .deliver_to_session(session.id(), &users.to_json())
        .await
    {
        tracing::warn!("Failed to send member list to '{}': {}", session.id(), e);
    }
}

fn usernames(members: &[Username]) -> Vec<String> {
    members
        .iter()
        .map(|username| username.as_str().to_string())
        .collect()
}

fn user_left_event(departure: &RoomDeparture) -> ServerEvent {
    ServerEvent::UserLeft {
        username: departure.username.as_str().to_string(),
        users: usernames(&departure.remaining),
    }
}
