//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomStateUseCase,
        PlaybackControlUseCase, RenameParticipantUseCase, SendChatUseCase, SubmitMediaUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RenameParticipantUseCase（表示名変更のユースケース）
    pub rename_participant_usecase: Arc<RenameParticipantUseCase>,
    /// PlaybackControlUseCase（再生操作のユースケース）
    pub playback_control_usecase: Arc<PlaybackControlUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    pub send_chat_usecase: Arc<SendChatUseCase>,
    /// SubmitMediaUseCase（メディア URL 送信のユースケース）
    pub submit_media_usecase: Arc<SubmitMediaUseCase>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
    /// 不正なリクエストへの `error` 返信に使う
    pub message_pusher: Arc<dyn MessagePusher>,
}
