//! 依存関係の組み立て
//!
//! 1. Repository
//! 2. MessagePusher
//! 3. Media Resolution Pipeline
//! 4. UseCases（遷移ロックを共有）
//! 5. Server

use std::sync::Arc;

use sajiki_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    domain::{
        MediaReference, MediaResolutionPipeline, MessagePusher, MetadataFetcher, MetadataSource,
        ParticipantRepository, PlaybackState, PlaybackStateRepository,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        metadata::HttpMetadataSource,
        repository::{InMemoryParticipantRepository, InMemoryPlaybackStateRepository},
    },
    ui::{AppState, Server},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomStateUseCase,
        PlaybackControlUseCase, RenameParticipantUseCase, RoomTransitionLock, SendChatUseCase,
        SubmitMediaUseCase,
    },
};

/// 実際のメタデータ API を使うサーバーを組み立てる
pub fn build_server(config: ServerConfig) -> Result<Server, Box<dyn std::error::Error>> {
    let source = Arc::new(HttpMetadataSource::new(config.metadata.clone())?);
    Ok(build_server_with_source(config, source))
}

/// メタデータ取得元を差し替えてサーバーを組み立てる
pub fn build_server_with_source(config: ServerConfig, source: Arc<dyn MetadataSource>) -> Server {
    // 1. Repository（インメモリ）
    let initial_media = MediaReference::new(
        config.initial_media_url.as_str(),
        config.initial_media_title.as_str(),
        MediaResolutionPipeline::provider_of(&config.initial_media_url),
    );
    let playback: Arc<dyn PlaybackStateRepository> = Arc::new(
        InMemoryPlaybackStateRepository::new(PlaybackState::new(
            initial_media,
            config.initial_chosen_by,
        )),
    );
    let participants: Arc<dyn ParticipantRepository> =
        Arc::new(InMemoryParticipantRepository::new());

    // 2. MessagePusher（WebSocket 実装）
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

    // 3. Media Resolution Pipeline
    let fetcher = MetadataFetcher::new(source, config.metadata.timeout);
    let pipeline = Arc::new(MediaResolutionPipeline::new(fetcher));

    // 4. UseCases
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let transitions = RoomTransitionLock::new();
    let state = AppState {
        connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions.clone(),
            clock.clone(),
        )),
        disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions.clone(),
            clock.clone(),
        )),
        rename_participant_usecase: Arc::new(RenameParticipantUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions.clone(),
            clock.clone(),
        )),
        playback_control_usecase: Arc::new(PlaybackControlUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions.clone(),
        )),
        send_chat_usecase: Arc::new(SendChatUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions.clone(),
            clock,
        )),
        submit_media_usecase: Arc::new(SubmitMediaUseCase::new(
            participants.clone(),
            playback.clone(),
            message_pusher.clone(),
            transitions,
            pipeline,
        )),
        get_room_state_usecase: Arc::new(GetRoomStateUseCase::new(participants, playback)),
        message_pusher,
    };

    // 5. Server
    Server::new(state)
}
