//! ドメイン層
//!
//! 値オブジェクト・エンティティ・メディア解決と、外部依存のインターフェース
//! （Repository, MessagePusher, MetadataSource）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod media;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, MediaReference, Participant, ParticipantRegistry, PlaybackState, Provider,
    RoomSnapshot,
};
pub use error::{
    MessagePushError, NameCollisionError, RepositoryError, ResolutionError,
    UnresolvableMediaError, ValueObjectError,
};
pub use event::RoomEvent;
pub use media::{
    Classification, MediaResolutionPipeline, MetadataFetcher, MetadataSource, classify,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ParticipantRepository, PlaybackStateRepository};
pub use value_object::{
    Color, ConnectionId, ConnectionIdFactory, DisplayName, MessageContent, PlaybackTime,
    Timestamp,
};
