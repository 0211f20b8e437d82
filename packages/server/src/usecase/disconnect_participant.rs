//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者が一覧から消え、残りの参加者に通知されることを保証
//! - 再生状態には一切触れないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中の参加者の切断
//! - 異常系：登録されていない ConnectionId の切断

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, Participant, ParticipantRepository,
    PlaybackStateRepository, RoomEvent, Timestamp,
};

use super::error::DisconnectError;
use super::transition::RoomTransitionLock;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 削除された参加者
    /// * `Err(DisconnectError)` - 参加者が見つからない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, DisconnectError> {
        let _transition = self.transitions.acquire().await;

        // 1. 送信先から外す（以降のブロードキャストは届かない）
        self.message_pusher.unregister_client(connection_id).await;

        // 2. Registry から削除
        let participant = self
            .participants
            .unregister(connection_id)
            .await
            .map_err(|_| DisconnectError::ParticipantNotFound(connection_id.to_string()))?;

        // 3. 残りの参加者に一覧と退室通知を送る
        let targets = self.participants.connection_ids().await;
        let roster = self.participants.roster().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &RoomEvent::RosterUpdated(roster))
            .await
        {
            tracing::warn!("Failed to broadcast roster: {}", e);
        }

        let current_time = self.playback.snapshot().await.current_time;
        let text = format!("{} left.", participant.display_name);
        let sent_at = Timestamp::new(self.clock.now_millis());
        if let Some(notice) = ChatMessage::notice(&participant, text, current_time, sent_at) {
            if let Err(e) = self
                .message_pusher
                .broadcast(targets, &RoomEvent::ChatBroadcast(notice))
                .await
            {
                tracing::warn!("Failed to broadcast leave notice: {}", e);
            }
        }

        tracing::info!(
            "Participant '{}' ({}) disconnected",
            connection_id,
            participant.display_name
        );
        Ok(participant)
    }
}
