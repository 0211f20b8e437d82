//! InMemory PlaybackState Repository 実装
//!
//! ルームに 1 つだけ存在する [`PlaybackState`] を保持します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, MediaReference, PlaybackState, PlaybackStateRepository, PlaybackTime,
};

/// インメモリ PlaybackState Repository 実装
pub struct InMemoryPlaybackStateRepository {
    state: Arc<Mutex<PlaybackState>>,
}

impl InMemoryPlaybackStateRepository {
    /// 初期状態を指定して作成
    pub fn new(initial: PlaybackState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }
}

#[async_trait]
impl PlaybackStateRepository for InMemoryPlaybackStateRepository {
    async fn snapshot(&self) -> PlaybackState {
        self.state.lock().await.clone()
    }

    async fn set_media(&self, media: MediaReference, chosen_by: &DisplayName) -> PlaybackState {
        let mut state = self.state.lock().await;
        state.set_media(media, chosen_by);
        tracing::info!(
            "Media set to '{}' ({}) by '{}'",
            state.media.title(),
            state.media.url(),
            state.chosen_by
        );
        state.clone()
    }

    async fn play(&self, at: PlaybackTime) -> PlaybackState {
        let mut state = self.state.lock().await;
        state.play(at);
        state.clone()
    }

    async fn pause(&self, at: PlaybackTime) -> PlaybackState {
        let mut state = self.state.lock().await;
        state.pause(at);
        state.clone()
    }

    async fn report_progress(&self, at: PlaybackTime) -> PlaybackState {
        let mut state = self.state.lock().await;
        state.report_progress(at);
        state.clone()
    }
}
