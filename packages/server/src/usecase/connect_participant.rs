//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 参加者の登録、色の割り当て、初期情報（roomConnected）の送信
//!
//! ### なぜこのテストが必要か
//! - 途中参加者が現在の再生状態と参加者一覧を受け取れることを保証
//! - 既存の参加者に参加者一覧の更新と入室通知が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 異常系：同じ ConnectionId での二重登録

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, Participant, ParticipantRepository,
    PlaybackStateRepository, PusherChannel, RoomEvent, Timestamp,
};

use super::error::ConnectError;
use super::transition::RoomTransitionLock;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
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

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - トランスポートが払い出した接続 ID
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者（色と初期表示名つき）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Participant, ConnectError> {
        let connected_at = Timestamp::new(self.clock.now_millis());
        let _transition = self.transitions.acquire().await;

        // 1. Registry に登録（色と初期表示名が決まる）
        let participant = self
            .participants
            .register(connection_id.clone(), connected_at)
            .await
            .map_err(|_| ConnectError::DuplicateConnection(connection_id.to_string()))?;

        // 2. MessagePusher に送信先を登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 3. 本人に初期情報を送る
        let state = self.playback.snapshot().await;
        let roster = self.participants.roster().await;
        let welcome = RoomEvent::RoomConnected {
            you: participant.clone(),
            state: state.clone(),
            participants: roster.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &welcome).await {
            tracing::warn!("Failed to send roomConnected to '{}': {}", connection_id, e);
        }

        // 4. 全員に参加者一覧と入室通知を送る
        let targets = self.participants.connection_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &RoomEvent::RosterUpdated(roster))
            .await
        {
            tracing::warn!("Failed to broadcast roster: {}", e);
        }

        let text = format!("{} joined.", participant.display_name);
        if let Some(notice) =
            ChatMessage::notice(&participant, text, state.current_time, connected_at)
        {
            if let Err(e) = self
                .message_pusher
                .broadcast(targets, &RoomEvent::ChatBroadcast(notice))
                .await
            {
                tracing::warn!("Failed to broadcast join notice: {}", e);
            }
        }

        tracing::info!(
            "Participant '{}' connected with color {}",
            connection_id,
            participant.color.as_str()
        );
        Ok(participant)
    }
}
