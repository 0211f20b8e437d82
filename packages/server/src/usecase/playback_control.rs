//! UseCase: 再生操作（play / pause / 進捗報告 / 状態要求）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlaybackControlUseCase の各メソッド
//!
//! ### なぜこのテストが必要か
//! - 到着順の後勝ち（last-write-wins）で状態が決まることを保証
//! - play / pause は操作した本人以外に、進捗報告は誰にも配信されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：play → 別の参加者の pause
//! - 正常系：requestState に対するスナップショット送信
//! - 異常系：登録されていない接続からの操作

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Participant, ParticipantRepository, PlaybackState,
    PlaybackStateRepository, PlaybackTime, RoomEvent,
};

use super::error::PlaybackError;
use super::transition::RoomTransitionLock;

/// 再生状態を操作するユースケース
pub struct PlaybackControlUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
}

impl PlaybackControlUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        playback: Arc<dyn PlaybackStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        transitions: RoomTransitionLock,
    ) -> Self {
        Self {
            participants,
            playback,
            message_pusher,
            transitions,
        }
    }

    /// 再生開始。操作した本人以外に `play` を送る
    pub async fn play(
        &self,
        requester: &ConnectionId,
        at: PlaybackTime,
    ) -> Result<PlaybackState, PlaybackError> {
        let _transition = self.transitions.acquire().await;
        let participant = self.requester(requester).await?;
        let state = self.playback.play(at).await;
        self.relay_to_others(
            requester,
            &RoomEvent::Play {
                at,
                by: participant.display_name,
            },
        )
        .await;
        Ok(state)
    }

    /// 一時停止。操作した本人以外に `pause` を送る
    pub async fn pause(
        &self,
        requester: &ConnectionId,
        at: PlaybackTime,
    ) -> Result<PlaybackState, PlaybackError> {
        let _transition = self.transitions.acquire().await;
        let participant = self.requester(requester).await?;
        let state = self.playback.pause(at).await;
        self.relay_to_others(
            requester,
            &RoomEvent::Pause {
                at,
                by: participant.display_name,
            },
        )
        .await;
        Ok(state)
    }

    /// 再生位置の報告。配信はしない
    pub async fn report_progress(
        &self,
        requester: &ConnectionId,
        at: PlaybackTime,
    ) -> Result<PlaybackState, PlaybackError> {
        let _transition = self.transitions.acquire().await;
        self.requester(requester).await?;
        Ok(self.playback.report_progress(at).await)
    }

    /// 現在の状態を要求者だけに送る（`requestState`）
    pub async fn send_snapshot(
        &self,
        requester: &ConnectionId,
    ) -> Result<PlaybackState, PlaybackError> {
        let _transition = self.transitions.acquire().await;
        self.requester(requester).await?;
        let state = self.playback.snapshot().await;
        if let Err(e) = self
            .message_pusher
            .push_to(requester, &RoomEvent::StateUpdated(state.clone()))
            .await
        {
            tracing::warn!("Failed to send state snapshot to '{}': {}", requester, e);
        }
        Ok(state)
    }

    async fn requester(&self, connection_id: &ConnectionId) -> Result<Participant, PlaybackError> {
        self.participants
            .find(connection_id)
            .await
            .ok_or_else(|| PlaybackError::ParticipantNotFound(connection_id.to_string()))
    }

    async fn relay_to_others(&self, requester: &ConnectionId, event: &RoomEvent) {
        let targets: Vec<ConnectionId> = self
            .participants
            .connection_ids()
            .await
            .into_iter()
            .filter(|id| id != requester)
            .collect();
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to relay '{}': {}", event.name(), e);
        }
        tracing::debug!("'{}' relayed from '{}'", event.name(), requester);
    }
}
