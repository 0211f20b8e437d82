//! MessagePusher trait 定義（Broadcast Relay）
//!
//! 参加者へのイベント配信を抽象化します。業務上の状態は一切持ちません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent};

/// クライアントへ送信済みフレーム（JSON 文字列）を流すチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 送信先としてクライアントを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 送信先からクライアントを削除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントにイベントを送る
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送る
    ///
    /// 一部の送信失敗は許容し、ログに残すだけにする。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
