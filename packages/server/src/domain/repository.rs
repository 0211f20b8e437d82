//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 回の呼び出しで完結する不可分な遷移です。読み込みと書き込みを
//! 別々の呼び出しに分けないでください。

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, MediaReference, Participant, PlaybackState, PlaybackTime,
    RepositoryError, Timestamp,
};

/// 再生状態（Session State Store）
#[async_trait]
pub trait PlaybackStateRepository: Send + Sync {
    /// 現在の再生状態のスナップショット
    async fn snapshot(&self) -> PlaybackState;

    /// メディアを差し替え、再生位置 0・停止状態にする
    async fn set_media(&self, media: MediaReference, chosen_by: &DisplayName) -> PlaybackState;

    /// 再生開始（位置も更新）
    async fn play(&self, at: PlaybackTime) -> PlaybackState;

    /// 一時停止（位置も更新）
    async fn pause(&self, at: PlaybackTime) -> PlaybackState;

    /// 再生位置のみ更新
    async fn report_progress(&self, at: PlaybackTime) -> PlaybackState;
}

/// 参加者（Participant Registry）
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 参加者を登録し、色と初期表示名を割り当てる
    async fn register(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    /// 表示名を変更する。成功時は変更前の表示名と変更後の参加者を返す
    async fn rename(
        &self,
        connection_id: &ConnectionId,
        desired_name: DisplayName,
    ) -> Result<(DisplayName, Participant), RepositoryError>;

    /// 参加者を削除する
    async fn unregister(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError>;

    /// 参加者を取得
    async fn find(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 登録順の参加者リスト
    async fn roster(&self) -> Vec<Participant>;

    /// 接続中の全ての ConnectionId
    async fn connection_ids(&self) -> Vec<ConnectionId>;
}
