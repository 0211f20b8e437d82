//! UseCase: メディア URL の送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitMediaUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 解決が完了した結果だけが再生状態に反映され、全員に配信されることを保証
//! - 解決できない URL では状態を変えず、送信者だけに通知されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：SoundCloud（ネットワーク呼び出しなし）
//! - 正常系：YouTube のメタデータ取得失敗時に生の識別子をタイトルにする
//! - 異常系：動画 ID が取り出せない YouTube URL
//! - エッジケース：解決中に送信者が切断した

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MediaResolutionPipeline, MessagePusher, ParticipantRepository, PlaybackState,
    PlaybackStateRepository, RoomEvent,
};

use super::error::SubmitMediaError;
use super::transition::RoomTransitionLock;

/// メディア URL 送信のユースケース
pub struct SubmitMediaUseCase {
    participants: Arc<dyn ParticipantRepository>,
    playback: Arc<dyn PlaybackStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    transitions: RoomTransitionLock,
    pipeline: Arc<MediaResolutionPipeline>,
}

impl SubmitMediaUseCase {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        playback: Arc<dyn PlaybackStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        transitions: RoomTransitionLock,
        pipeline: Arc<MediaResolutionPipeline>,
    ) -> Self {
        Self {
            participants,
            playback,
            message_pusher,
            transitions,
            pipeline,
        }
    }

    /// URL を解決し、成功したらメディアを差し替えて全員に `stateUpdated` を送る
    ///
    /// `chosenBy` は送信時点の表示名。解決中に送信者が切断しても結果は反映する。
    pub async fn execute(
        &self,
        submitter: &ConnectionId,
        url: String,
    ) -> Result<PlaybackState, SubmitMediaError> {
        let chooser = self
            .participants
            .find(submitter)
            .await
            .ok_or_else(|| SubmitMediaError::ParticipantNotFound(submitter.to_string()))?
            .display_name;

        let media = match self.pipeline.resolve(&url).await {
            Ok(media) => media,
            Err(e) => {
                tracing::info!("Rejected media URL from '{}': {}", submitter, e);
                let event = RoomEvent::MediaRejected {
                    url: e.url.clone(),
                    reason: e.to_string(),
                };
                if let Err(push_error) = self.message_pusher.push_to(submitter, &event).await {
                    tracing::warn!(
                        "Failed to send mediaRejected to '{}': {}",
                        submitter,
                        push_error
                    );
                }
                return Err(e.into());
            }
        };

        // 解決が終わってから遷移ロックを取る
        let _transition = self.transitions.acquire().await;
        let state = self.playback.set_media(media, &chooser).await;

        let targets = self.participants.connection_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RoomEvent::StateUpdated(state.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast new media: {}", e);
        }
        Ok(state)
    }
}
