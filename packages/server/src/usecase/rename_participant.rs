//! UseCase: 表示名の変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RenameParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 表示名が生きている参加者の間で一意であることを保証
//! - 衝突時は要求者だけに拒否が通知され、誰の表示名も変わらないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空いている名前への変更、自分の現在の名前への変更
//! - 異常系：他の参加者が使っている名前、空白のみの名前

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, DisplayName, MessagePusher, Participant, ParticipantRepository,
    PlaybackStateRepository, RepositoryError, RoomEvent, Timestamp,
};

use super::error::RenameError;
use super::transition::RoomTransitionLock;

/// 表示名変更のユースケース
pub struct RenameParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
    clock: Arc<dyn Clock>,
}

impl RenameParticipantUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        playback: Arc<dyn PlaybackStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        transitions: RoomTransitionLock,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            playback,
            message_pusher,
            transitions,
            clock,
        }
    }

    /// 表示名変更を実行
    ///
    /// 失敗時（不正な名前・衝突）は要求者に `renameRejected` を送ってから
    /// エラーを返す。成功時は全員に `renamed` と参加者一覧を送る。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        desired_name: String,
    ) -> Result<Participant, RenameError> {
        let _transition = self.transitions.acquire().await;
        let desired = match DisplayName::new(desired_name.as_str()) {
            Ok(name) => name,
            Err(e) => {
                self.reject(connection_id, &desired_name, &e.to_string()).await;
                return Err(e.into());
            }
        };

        let (old_name, participant) = match self.participants.rename(connection_id, desired).await
        {
            Ok(renamed) => renamed,
            Err(RepositoryError::NameCollision(collision)) => {
                tracing::info!(
                    "Rename of '{}' to '{}' rejected: name in use",
                    connection_id,
                    collision.desired_name
                );
                self.reject(connection_id, &desired_name, &collision.to_string())
                    .await;
                self.notify_collision(connection_id, &collision.desired_name)
                    .await;
                return Err(collision.into());
            }
            Err(_) => {
                return Err(RenameError::ParticipantNotFound(connection_id.to_string()));
            }
        };

        let targets = self.participants.connection_ids().await;
        let renamed = RoomEvent::Renamed {
            connection_id: connection_id.clone(),
            old_name: old_name.clone(),
            new_name: participant.display_name.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(targets.clone(), &renamed).await {
            tracing::warn!("Failed to broadcast renamed: {}", e);
        }

        let roster = self.participants.roster().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &RoomEvent::RosterUpdated(roster))
            .await
        {
            tracing::warn!("Failed to broadcast roster: {}", e);
        }

        let text = format!(
            "{} changed their nickname to {}",
            old_name, participant.display_name
        );
        if let Some(notice) = self.notice(&participant, text).await {
            if let Err(e) = self
                .message_pusher
                .broadcast(targets, &RoomEvent::ChatBroadcast(notice))
                .await
            {
                tracing::warn!("Failed to broadcast rename notice: {}", e);
            }
        }

        tracing::info!(
            "Participant '{}' renamed from '{}' to '{}'",
            connection_id,
            old_name,
            participant.display_name
        );
        Ok(participant)
    }

    async fn reject(&self, connection_id: &ConnectionId, desired_name: &str, reason: &str) {
        let event = RoomEvent::RenameRejected {
            desired_name: desired_name.to_string(),
            reason: reason.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!("Failed to send renameRejected to '{}': {}", connection_id, e);
        }
    }

    /// 衝突した旨のお知らせ（要求者のみ）
    async fn notify_collision(&self, connection_id: &ConnectionId, desired_name: &str) {
        let Some(participant) = self.participants.find(connection_id).await else {
            return;
        };
        let text = format!(
            "{} tried to change their nickname to {} but it's already in use",
            participant.display_name, desired_name
        );
        if let Some(notice) = self.notice(&participant, text).await {
            if let Err(e) = self
                .message_pusher
                .push_to(connection_id, &RoomEvent::ChatBroadcast(notice))
                .await
            {
                tracing::warn!("Failed to send collision notice to '{}': {}", connection_id, e);
            }
        }
    }

    async fn notice(&self, participant: &Participant, text: String) -> Option<ChatMessage> {
        let current_time = self.playback.snapshot().await.current_time;
        let sent_at = Timestamp::new(self.clock.now_millis());
        ChatMessage::notice(participant, text, current_time, sent_at)
    }
}
