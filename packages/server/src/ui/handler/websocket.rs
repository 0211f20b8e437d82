//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, MessageContent, PlaybackTime, RoomEvent},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to this
/// connection (via rx channel) are written to its WebSocket.
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
    let (sender, receiver) = socket.split();

    // 接続 ID はサーバーが払い出す
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // roomConnected などは rx に積まれ、pusher_loop が送り出す
    if let Err(e) = state
        .connect_participant_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        tracing::error!("Failed to connect '{}': {}", connection_id, e);
        return;
    }

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        state.clone(),
        connection_id.clone(),
    ));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        tracing::warn!("Failed to disconnect participant '{}': {}", connection_id, e);
    }
}

/// Inbound message flow: frames from this client, processed in arrival order.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", connection_id, text);

                match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch(&state, &connection_id, event).await,
                    Err(e) => {
                        tracing::warn!("Failed to parse message from '{}': {}", connection_id, e);
                        reply_error(&state, &connection_id, format!("malformed event: {e}")).await;
                    }
                }
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}

/// Domain Model へ変換してから各 UseCase に渡す
async fn dispatch(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::SubmitMediaUrl { url } => {
            // 解決中も同じ接続の他のイベントを処理できるよう別タスクで実行
            let usecase = state.submit_media_usecase.clone();
            let submitter = connection_id.clone();
            tokio::spawn(async move {
                if let Err(e) = usecase.execute(&submitter, url).await {
                    tracing::info!("Media submission from '{}' failed: {}", submitter, e);
                }
            });
        }
        ClientEvent::RequestState => {
            if let Err(e) = state
                .playback_control_usecase
                .send_snapshot(connection_id)
                .await
            {
                tracing::warn!("Failed to send state: {}", e);
            }
        }
        ClientEvent::Play { at_time } => {
            let Some(at) = playback_time(state, connection_id, at_time).await else {
                return;
            };
            if let Err(e) = state.playback_control_usecase.play(connection_id, at).await {
                tracing::warn!("Failed to play: {}", e);
            }
        }
        ClientEvent::Pause { at_time } => {
            let Some(at) = playback_time(state, connection_id, at_time).await else {
                return;
            };
            if let Err(e) = state.playback_control_usecase.pause(connection_id, at).await {
                tracing::warn!("Failed to pause: {}", e);
            }
        }
        ClientEvent::ReportProgress { at_time } => {
            let Some(at) = playback_time(state, connection_id, at_time).await else {
                return;
            };
            if let Err(e) = state
                .playback_control_usecase
                .report_progress(connection_id, at)
                .await
            {
                tracing::warn!("Failed to record progress: {}", e);
            }
        }
        ClientEvent::RenameRequest { desired_name } => {
            // 拒否は UseCase が要求者に通知済み
            if let Err(e) = state
                .rename_participant_usecase
                .execute(connection_id, desired_name)
                .await
            {
                tracing::debug!("Rename by '{}' failed: {}", connection_id, e);
            }
        }
        ClientEvent::SendChat { text } => {
            let content = match MessageContent::new(text) {
                Ok(content) => content,
                Err(e) => {
                    reply_error(state, connection_id, e.to_string()).await;
                    return;
                }
            };
            if let Err(e) = state.send_chat_usecase.execute(connection_id, content).await {
                tracing::warn!("Failed to send chat: {}", e);
            }
        }
    }
}

async fn playback_time(
    state: &AppState,
    connection_id: &ConnectionId,
    seconds: f64,
) -> Option<PlaybackTime> {
    match PlaybackTime::new(seconds) {
        Ok(at) => Some(at),
        Err(e) => {
            reply_error(state, connection_id, e.to_string()).await;
            None
        }
    }
}

/// 不正なリクエストを送ってきたクライアントにだけ `error` を返す
async fn reply_error(state: &AppState, connection_id: &ConnectionId, reason: String) {
    let event = RoomEvent::InvalidRequest { reason };
    if let Err(e) = state.message_pusher.push_to(connection_id, &event).await {
        tracing::warn!("Failed to send error to '{}': {}", connection_id, e);
    }
}
