//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{NameCollisionError, UnresolvableMediaError, ValueObjectError};

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// 参加者切断のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// 表示名変更のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenameError {
    #[error("invalid display name: {0}")]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    NameCollision(#[from] NameCollisionError),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// 再生操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// チャット送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendChatError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// メディア URL 送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitMediaError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error(transparent)]
    Unresolvable(#[from] UnresolvableMediaError),
}
