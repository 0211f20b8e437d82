//! エンティティ
//!
//! - [`PlaybackState`]: ルームに 1 つだけ存在する再生状態
//! - [`ParticipantRegistry`]: 接続中の参加者と表示色の管理
//! - [`MediaReference`], [`Participant`], [`ChatMessage`]

use serde::Serialize;

use super::{
    error::{NameCollisionError, RepositoryError},
    value_object::{Color, ConnectionId, DisplayName, MessageContent, PlaybackTime, Timestamp},
};

/// メディアの提供元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provider {
    YouTube,
    SoundCloud,
    Twitch,
    /// 上記以外（Facebook 動画リンクを想定）
    Generic,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::SoundCloud => "soundcloud",
            Provider::Twitch => "twitch",
            Provider::Generic => "generic",
        }
    }
}

/// 解決済みのメディア参照（生成後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaReference {
    url: String,
    title: String,
    provider: Provider,
}

impl MediaReference {
    pub fn new(url: impl Into<String>, title: impl Into<String>, provider: Provider) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            provider,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }
}

/// ルームの再生状態
///
/// 各遷移メソッドは全フィールドをまとめて更新する。読み手は Repository の
/// ロック越しにしか触れないため、途中の状態が見えることはない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub media: MediaReference,
    /// 最後にメディアを選んだ参加者の表示名
    pub chosen_by: String,
    pub current_time: PlaybackTime,
    pub playing: bool,
}

impl PlaybackState {
    pub fn new(media: MediaReference, chosen_by: impl Into<String>) -> Self {
        Self {
            media,
            chosen_by: chosen_by.into(),
            current_time: PlaybackTime::ZERO,
            playing: false,
        }
    }

    /// メディアを差し替え、先頭で停止した状態に戻す
    pub fn set_media(&mut self, media: MediaReference, chosen_by: &DisplayName) {
        *self = Self::new(media, chosen_by.as_str());
    }

    pub fn play(&mut self, at: PlaybackTime) {
        self.current_time = at;
        self.playing = true;
    }

    pub fn pause(&mut self, at: PlaybackTime) {
        self.current_time = at;
        self.playing = false;
    }

    /// 再生位置だけを記録する（途中参加者向け）
    pub fn report_progress(&mut self, at: PlaybackTime) {
        self.current_time = at;
    }
}

/// 参加者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub color: Color,
    pub connected_at: Timestamp,
}

/// 参加者の一覧（登録順）
///
/// 色は「現在の登録数 mod パレットサイズ」で割り当てる。切断で空いた色を
/// 優先して再利用することはなく、登録数が一致したときに結果的に再利用される。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を登録する
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        if self.find(&connection_id).is_some() {
            return Err(RepositoryError::DuplicateParticipant(
                connection_id.into_string(),
            ));
        }

        let participant = Participant {
            display_name: DisplayName::from(&connection_id),
            color: Color::from_palette(self.participants.len()),
            connection_id,
            connected_at,
        };
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// 表示名を変更する
    ///
    /// 成功時は変更前の表示名と変更後の参加者を返す。自分自身の現在の表示名への
    /// 変更は衝突とみなさない。
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        desired_name: DisplayName,
    ) -> Result<(DisplayName, Participant), RepositoryError> {
        let taken_by_other = self
            .participants
            .iter()
            .any(|p| &p.connection_id != connection_id && p.display_name == desired_name);
        if taken_by_other {
            return Err(NameCollisionError {
                desired_name: desired_name.into_string(),
            }
            .into());
        }

        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(connection_id.to_string()))?;

        let old_name = std::mem::replace(&mut participant.display_name, desired_name);
        Ok((old_name, participant.clone()))
    }

    /// 参加者を削除する
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn find(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    /// 登録順の参加者リスト
    pub fn roster(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// ルーム全体の読み取り用スナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub state: PlaybackState,
    pub participants: Vec<Participant>,
}

/// チャットメッセージ（永続化しない、配信用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub author: DisplayName,
    pub color: Color,
    pub content: MessageContent,
    /// 送信時点でのルームの再生位置
    pub playback_time: PlaybackTime,
    pub sent_at: Timestamp,
    /// 入退室・改名などのシステム通知なら true
    pub notice: bool,
}

impl ChatMessage {
    pub fn new(
        author: &Participant,
        content: MessageContent,
        playback_time: PlaybackTime,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            author: author.display_name.clone(),
            color: author.color,
            content,
            playback_time,
            sent_at,
            notice: false,
        }
    }

    /// システム通知としてのメッセージ
    pub fn notice(
        author: &Participant,
        text: impl Into<String>,
        playback_time: PlaybackTime,
        sent_at: Timestamp,
    ) -> Option<Self> {
        let content = MessageContent::new(text.into()).ok()?;
        Some(Self {
            notice: true,
            ..Self::new(author, content, playback_time, sent_at)
        })
    }
}
