//! ドメイン層のエラー定義

use std::time::Duration;

use thiserror::Error;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("ConnectionId must not be empty")]
    ConnectionIdEmpty,

    #[error("display name must not be blank")]
    DisplayNameEmpty,

    #[error(
        "display name is too long ({0} chars, max {max})",
        max = super::value_object::DisplayName::MAX_CHARS
    )]
    DisplayNameTooLong(usize),

    #[error("message content must not be blank")]
    MessageContentEmpty,

    #[error(
        "message content is too long ({0} chars, max {max})",
        max = super::value_object::MessageContent::MAX_CHARS
    )]
    MessageContentTooLong(usize),

    #[error("playback time must be a finite, non-negative number of seconds (got {0})")]
    InvalidPlaybackTime(f64),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error("participant '{0}' is already registered")]
    DuplicateParticipant(String),

    #[error(transparent)]
    NameCollision(#[from] NameCollisionError),
}

/// 表示名が別の接続に使われている
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display name '{desired_name}' is already in use")]
pub struct NameCollisionError {
    pub desired_name: String,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}

/// 外部メタデータ API の呼び出し失敗
///
/// どの variant もパイプライン側では「解決失敗」として同一に扱われる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("metadata request failed: {0}")]
    Request(String),

    #[error("metadata endpoint returned HTTP {0}")]
    Status(u16),

    #[error("malformed metadata response: {0}")]
    MalformedBody(String),

    #[error("metadata response contained no results")]
    EmptyResult,

    #[error("metadata request timed out after {0:?}")]
    Timeout(Duration),
}

/// URL はプロバイダに一致したが、識別子を取り出せなかった
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not extract a media identifier from '{url}'")]
pub struct UnresolvableMediaError {
    pub url: String,
}
