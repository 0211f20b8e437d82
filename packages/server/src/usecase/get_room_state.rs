//! UseCase: ルーム状態の取得（読み取り専用）

use std::sync::Arc;

use crate::domain::{ParticipantRepository, PlaybackStateRepository, RoomSnapshot};

/// HTTP のスナップショット API 用
pub struct GetRoomStateUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
}

impl GetRoomStateUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        playback: Arc<dyn PlaybackStateRepository>,
    ) -> Self {
        Self {
            participants,
            playback,
        }
    }

    pub async fn execute(&self) -> RoomSnapshot {
        RoomSnapshot {
            state: self.playback.snapshot().await,
            participants: self.participants.roster().await,
        }
    }
}
