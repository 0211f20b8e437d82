//! ルームから参加者へ送られるイベント
//!
//! UseCase 層はこの型で通知内容を組み立て、ワイヤ形式（JSON）への変換は
//! Infrastructure 層の MessagePusher が行う。

use super::{
    entity::{ChatMessage, Participant, PlaybackState},
    value_object::{ConnectionId, DisplayName, PlaybackTime},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// 新規接続者への初期情報
    RoomConnected {
        you: Participant,
        state: PlaybackState,
        participants: Vec<Participant>,
    },
    /// 再生状態のスナップショット
    StateUpdated(PlaybackState),
    Play {
        at: PlaybackTime,
        by: DisplayName,
    },
    Pause {
        at: PlaybackTime,
        by: DisplayName,
    },
    RosterUpdated(Vec<Participant>),
    Renamed {
        connection_id: ConnectionId,
        old_name: DisplayName,
        new_name: DisplayName,
    },
    RenameRejected {
        desired_name: String,
        reason: String,
    },
    ChatBroadcast(ChatMessage),
    MediaRejected {
        url: String,
        reason: String,
    },
    /// 受信したリクエストが不正だった（送信者のみに返す）
    InvalidRequest {
        reason: String,
    },
}

impl RoomEvent {
    /// ログ用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::RoomConnected { .. } => "roomConnected",
            RoomEvent::StateUpdated(_) => "stateUpdated",
            RoomEvent::Play { .. } => "play",
            RoomEvent::Pause { .. } => "pause",
            RoomEvent::RosterUpdated(_) => "rosterUpdated",
            RoomEvent::Renamed { .. } => "renamed",
            RoomEvent::RenameRejected { .. } => "renameRejected",
            RoomEvent::ChatBroadcast(_) => "chatBroadcast",
            RoomEvent::MediaRejected { .. } => "mediaRejected",
            RoomEvent::InvalidRequest { .. } => "error",
        }
    }
}
