//! Integration tests driving the real router over WebSocket and HTTP.
//!
//! Each test starts an in-process server on an ephemeral port and connects
//! clients with tokio-tungstenite.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use sajiki_server::{
    bootstrap::build_server_with_source,
    config::{DEFAULT_INITIAL_MEDIA_TITLE, ServerConfig},
    domain::{MetadataSource, ResolutionError},
    infrastructure::dto::{
        http::RoomSnapshotDto,
        websocket::{ClientEvent, ParticipantDto, PlaybackStateDto, ServerEvent},
    },
};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);
const SILENCE: Duration = Duration::from_millis(300);

/// Metadata source with no network: YouTube always fails, Graph returns a fixed name
struct StubSource;

#[async_trait]
impl MetadataSource for StubSource {
    async fn youtube_title(&self, _video_id: &str) -> Result<String, ResolutionError> {
        Err(ResolutionError::Status(403))
    }

    async fn graph_name(&self, _object_id: &str) -> Result<String, ResolutionError> {
        Ok("Launch video".to_string())
    }
}

/// Metadata source whose YouTube lookup takes a while before answering
struct SlowSource;

const SLOW_LOOKUP: Duration = Duration::from_millis(800);

#[async_trait]
impl MetadataSource for SlowSource {
    async fn youtube_title(&self, _video_id: &str) -> Result<String, ResolutionError> {
        tokio::time::sleep(SLOW_LOOKUP).await;
        Ok("Slow video".to_string())
    }

    async fn graph_name(&self, _object_id: &str) -> Result<String, ResolutionError> {
        Err(ResolutionError::EmptyResult)
    }
}

/// Helper struct to manage the in-process server lifecycle
struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(Arc::new(StubSource)).await
    }

    async fn start_with(source: Arc<dyn MetadataSource>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = build_server_with_source(ServerConfig::default(), source);
        let handle = tokio::spawn(server.serve(listener));
        TestServer { addr, handle }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn room(&self) -> RoomSnapshotDto {
        reqwest::get(self.http_url("/api/room"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket participant
struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    me: ParticipantDto,
    welcome_state: PlaybackStateDto,
    welcome_participants: Vec<ParticipantDto>,
}

impl TestClient {
    /// Connect and consume the welcome sequence (roomConnected, rosterUpdated, join notice)
    async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url()).await.unwrap();
        let mut client = TestClient {
            stream,
            me: ParticipantDto {
                connection_id: String::new(),
                display_name: String::new(),
                color: String::new(),
                connected_at: 0,
            },
            welcome_state: PlaybackStateDto {
                media_url: String::new(),
                media_title: String::new(),
                provider: String::new(),
                chosen_by: String::new(),
                current_time: 0.0,
                playing: false,
            },
            welcome_participants: Vec::new(),
        };

        match client.recv().await {
            ServerEvent::RoomConnected {
                you,
                state,
                participants,
            } => {
                client.me = you;
                client.welcome_state = state;
                client.welcome_participants = participants;
            }
            other => panic!("expected roomConnected, got {other:?}"),
        }
        assert!(matches!(client.recv().await, ServerEvent::RosterUpdated { .. }));
        assert!(matches!(client.recv().await, ServerEvent::ChatBroadcast { .. }));
        client
    }

    fn id(&self) -> String {
        self.me.connection_id.clone()
    }

    async fn send(&mut self, event: ClientEvent) {
        let text = serde_json::to_string(&event).unwrap();
        self.send_raw(&text).await;
    }

    async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .unwrap();
    }

    async fn recv(&mut self) -> ServerEvent {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for a frame")
                .expect("stream closed")
                .expect("websocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Skip the rosterUpdated + join notice produced by another client's connect
    async fn skip_join_of_other(&mut self) {
        assert!(matches!(self.recv().await, ServerEvent::RosterUpdated { .. }));
        assert!(matches!(self.recv().await, ServerEvent::ChatBroadcast { .. }));
    }

    async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(SILENCE, self.stream.next()).await
        {
            panic!("expected no frame, got {text}");
        }
    }

    async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}

/// Two connected clients, with the join traffic already consumed
async fn pair(server: &TestServer) -> (TestClient, TestClient) {
    let mut a = TestClient::connect(server).await;
    let b = TestClient::connect(server).await;
    a.skip_join_of_other().await;
    (a, b)
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: /api/health が ok を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_connect_receives_welcome() {
    // テスト項目: 接続直後に自分の情報・初期メディア・参加者一覧が届く
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let a = TestClient::connect(&server).await;
    let b = TestClient::connect(&server).await;

    // then (期待する結果):
    assert_eq!(a.me.display_name, a.me.connection_id);
    assert_eq!(a.me.color, "#FF0000");
    assert_eq!(b.me.color, "#FFA500");
    assert_eq!(a.welcome_state.media_title, DEFAULT_INITIAL_MEDIA_TITLE);
    assert_eq!(a.welcome_state.provider, "youtube");
    assert!(!a.welcome_state.playing);
    assert_eq!(a.welcome_participants.len(), 1);
    let ids: Vec<String> = b
        .welcome_participants
        .iter()
        .map(|p| p.connection_id.clone())
        .collect();
    assert_eq!(ids, vec![a.id(), b.id()]);

    let room = server.room().await;
    assert_eq!(room.participants.len(), 2);
}

#[tokio::test]
async fn test_play_then_pause_last_write_wins() {
    // テスト項目: play は他の参加者へ中継され、後から届いた pause の状態が残る
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作):
    a.send(ClientEvent::Play { at_time: 10.0 }).await;
    let relayed_play = b.recv().await;
    b.send(ClientEvent::Pause { at_time: 14.5 }).await;
    let relayed_pause = a.recv().await;

    // then (期待する結果):
    assert_eq!(
        relayed_play,
        ServerEvent::Play {
            at_time: 10.0,
            by: a.id()
        }
    );
    assert_eq!(
        relayed_pause,
        ServerEvent::Pause {
            at_time: 14.5,
            by: b.id()
        }
    );
    a.expect_silence().await;
    b.expect_silence().await;

    let room = server.room().await;
    assert_eq!(room.state.current_time, 14.5);
    assert!(!room.state.playing);
}

#[tokio::test]
async fn test_report_progress_and_request_state() {
    // テスト項目: 進捗報告は配信されず、requestState で要求者だけが最新状態を受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作):
    a.send(ClientEvent::ReportProgress { at_time: 33.0 }).await;
    a.send(ClientEvent::RequestState).await;

    // then (期待する結果):
    match a.recv().await {
        ServerEvent::StateUpdated { state } => assert_eq!(state.current_time, 33.0),
        other => panic!("expected stateUpdated, got {other:?}"),
    }
    b.expect_silence().await;

    b.send(ClientEvent::RequestState).await;
    match b.recv().await {
        ServerEvent::StateUpdated { state } => assert_eq!(state.current_time, 33.0),
        other => panic!("expected stateUpdated, got {other:?}"),
    }
    a.expect_silence().await;
}

#[tokio::test]
async fn test_rename_and_collision() {
    // テスト項目: 改名は全員に通知され、使用中の名前への改名は要求者だけが拒否される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作): a が alice に改名
    a.send(ClientEvent::RenameRequest {
        desired_name: "alice".to_string(),
    })
    .await;

    // then (期待する結果):
    let expected = ServerEvent::Renamed {
        connection_id: a.id(),
        old_name: a.id(),
        new_name: "alice".to_string(),
    };
    assert_eq!(a.recv().await, expected);
    assert_eq!(b.recv().await, expected);
    for client in [&mut a, &mut b] {
        match client.recv().await {
            ServerEvent::RosterUpdated { participants } => {
                assert_eq!(participants[0].display_name, "alice")
            }
            other => panic!("expected rosterUpdated, got {other:?}"),
        }
        assert!(matches!(
            client.recv().await,
            ServerEvent::ChatBroadcast { message } if message.notice
        ));
    }

    // when (操作): b も alice に改名しようとする
    b.send(ClientEvent::RenameRequest {
        desired_name: "alice".to_string(),
    })
    .await;

    // then (期待する結果):
    assert!(matches!(
        b.recv().await,
        ServerEvent::RenameRejected { desired_name, .. } if desired_name == "alice"
    ));
    assert!(matches!(
        b.recv().await,
        ServerEvent::ChatBroadcast { message } if message.notice
    ));
    a.expect_silence().await;

    let names: Vec<String> = server
        .room()
        .await
        .participants
        .into_iter()
        .map(|p| p.display_name)
        .collect();
    assert_eq!(names, vec!["alice".to_string(), b.id()]);
}

#[tokio::test]
async fn test_chat_reaches_everyone() {
    // テスト項目: チャットは送信者を含む全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作):
    a.send(ClientEvent::SendChat {
        text: "hello".to_string(),
    })
    .await;

    // then (期待する結果):
    for client in [&mut a, &mut b] {
        match client.recv().await {
            ServerEvent::ChatBroadcast { message } => {
                assert_eq!(message.text, "hello");
                assert_eq!(message.color, "#FF0000");
                assert!(!message.notice);
            }
            other => panic!("expected chatBroadcast, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_disconnect_updates_roster() {
    // テスト項目: 切断すると残りの参加者に一覧更新と退室通知が届き、再生状態は変わらない
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;
    let b_id = b.id();
    a.send(ClientEvent::Play { at_time: 5.0 }).await;
    assert!(matches!(b.recv().await, ServerEvent::Play { .. }));
    let before = server.room().await.state;

    // when (操作):
    b.close().await;

    // then (期待する結果):
    match a.recv().await {
        ServerEvent::RosterUpdated { participants } => {
            assert_eq!(participants.len(), 1);
            assert_eq!(participants[0].connection_id, a.id());
        }
        other => panic!("expected rosterUpdated, got {other:?}"),
    }
    match a.recv().await {
        ServerEvent::ChatBroadcast { message } => {
            assert!(message.notice);
            assert_eq!(message.text, format!("{b_id} left."));
        }
        other => panic!("expected chatBroadcast, got {other:?}"),
    }
    assert_eq!(server.room().await.state, before);
}

#[tokio::test]
async fn test_submit_soundcloud_url() {
    // テスト項目: SoundCloud の URL を送ると全員に新しいメディアが配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作):
    a.send(ClientEvent::SubmitMediaUrl {
        url: "https://soundcloud.com/artist/my-cool-track".to_string(),
    })
    .await;

    // then (期待する結果):
    for client in [&mut a, &mut b] {
        match client.recv().await {
            ServerEvent::StateUpdated { state } => {
                assert_eq!(state.media_title, "my cool track");
                assert_eq!(state.provider, "soundcloud");
                assert_eq!(state.current_time, 0.0);
                assert!(!state.playing);
            }
            other => panic!("expected stateUpdated, got {other:?}"),
        }
    }
    assert_eq!(server.room().await.state.chosen_by, a.id());
}

#[tokio::test]
async fn test_submit_youtube_and_generic_titles() {
    // テスト項目: YouTube の取得失敗は動画 ID、汎用 URL は Graph の name がタイトルになる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = TestClient::connect(&server).await;

    // when (操作):
    a.send(ClientEvent::SubmitMediaUrl {
        url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
    })
    .await;
    let youtube = a.recv().await;
    a.send(ClientEvent::SubmitMediaUrl {
        url: "https://www.facebook.com/watch/10153231379946729".to_string(),
    })
    .await;
    let generic = a.recv().await;

    // then (期待する結果):
    assert!(matches!(youtube, ServerEvent::StateUpdated { state }
        if state.media_title == "dQw4w9WgXcQ" && state.provider == "youtube"));
    assert!(matches!(generic, ServerEvent::StateUpdated { state }
        if state.media_title == "Launch video" && state.provider == "generic"));
}

#[tokio::test]
async fn test_pending_resolution_does_not_block_other_events() {
    // テスト項目: メタデータ取得中も同じ接続・他の接続のイベントは先に配信され、
    //             解決が終わるまで途中経過のフレームは届かない
    // given (前提条件):
    let server = TestServer::start_with(Arc::new(SlowSource)).await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作):
    a.send(ClientEvent::SubmitMediaUrl {
        url: "https://www.youtube.com/watch?v=nnD8FKXzIGs".to_string(),
    })
    .await;
    a.send(ClientEvent::Play { at_time: 3.0 }).await;
    let relayed_play = b.recv().await;
    b.send(ClientEvent::SendChat {
        text: "still here".to_string(),
    })
    .await;

    // then (期待する結果):
    assert!(matches!(relayed_play, ServerEvent::Play { at_time, .. } if at_time == 3.0));
    for client in [&mut a, &mut b] {
        match client.recv().await {
            ServerEvent::ChatBroadcast { message } => assert_eq!(message.text, "still here"),
            other => panic!("expected chatBroadcast, got {other:?}"),
        }
    }
    let room = server.room().await;
    assert!(room.state.playing);
    assert_eq!(room.state.media_title, DEFAULT_INITIAL_MEDIA_TITLE);

    for client in [&mut a, &mut b] {
        match client.recv().await {
            ServerEvent::StateUpdated { state } => {
                assert_eq!(state.media_title, "Slow video");
                assert!(!state.playing);
            }
            other => panic!("expected stateUpdated, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_unresolvable_url_rejected_for_submitter_only() {
    // テスト項目: 動画 ID のない YouTube URL は送信者だけに mediaRejected が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;
    let before = server.room().await.state;

    // when (操作):
    a.send(ClientEvent::SubmitMediaUrl {
        url: "https://www.youtube.com/channel/abc".to_string(),
    })
    .await;

    // then (期待する結果):
    assert!(matches!(
        a.recv().await,
        ServerEvent::MediaRejected { url, .. } if url == "https://www.youtube.com/channel/abc"
    ));
    b.expect_silence().await;
    assert_eq!(server.room().await.state, before);
}

#[tokio::test]
async fn test_invalid_frames_answered_with_error() {
    // テスト項目: 壊れたフレームや不正な値は送信者だけに error が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut a, mut b) = pair(&server).await;

    // when (操作) / then (期待する結果):
    a.send_raw("not json").await;
    assert!(matches!(a.recv().await, ServerEvent::Error { .. }));

    a.send_raw(r#"{"type":"teleport"}"#).await;
    assert!(matches!(a.recv().await, ServerEvent::Error { .. }));

    a.send(ClientEvent::Play { at_time: -1.0 }).await;
    assert!(matches!(a.recv().await, ServerEvent::Error { .. }));

    a.send(ClientEvent::SendChat {
        text: "   ".to_string(),
    })
    .await;
    assert!(matches!(a.recv().await, ServerEvent::Error { .. }));

    b.expect_silence().await;
    assert!(!server.room().await.state.playing);
}
