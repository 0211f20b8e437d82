//! UseCase: チャット送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全員に、送信者の表示名・色・送信時点の再生位置つきで届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 正常系：改名後の送信は新しい表示名で届く
//! - 異常系：登録されていない接続からの送信

use std::sync::Arc;

use sajiki_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageContent, MessagePusher, ParticipantRepository,
    PlaybackStateRepository, RoomEvent, Timestamp,
};

use super::error::SendChatError;
use super::transition::RoomTransitionLock;

/// チャット送信のユースケース
pub struct SendChatUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
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

    /// チャット送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 配信したメッセージ
    /// * `Err(SendChatError)` - 送信者が見つからない
    pub async fn execute(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatMessage, SendChatError> {
        let _transition = self.transitions.acquire().await;
        let author = self
            .participants
            .find(from)
            .await
            .ok_or_else(|| SendChatError::ParticipantNotFound(from.to_string()))?;

        let current_time = self.playback.snapshot().await.current_time;
        let sent_at = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(&author, content, current_time, sent_at);

        // 送信者自身にも返す
        let targets = self.participants.connection_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RoomEvent::ChatBroadcast(message.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast chat from '{}': {}", from, e);
        }

        tracing::debug!("Chat from '{}' broadcasted", author.display_name);
        Ok(message)
    }
}
