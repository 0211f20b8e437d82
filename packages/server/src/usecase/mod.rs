//! UseCase 層
//!
//! クライアントからの要求ごとに、Repository の遷移と MessagePusher による
//! 配信を組み合わせます。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_state;
pub mod playback_control;
pub mod rename_participant;
pub mod send_chat;
pub mod submit_media;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    ConnectError, DisconnectError, PlaybackError, RenameError, SendChatError, SubmitMediaError,
};
pub use get_room_state::GetRoomStateUseCase;
pub use playback_control::PlaybackControlUseCase;
pub use rename_participant::RenameParticipantUseCase;
pub use send_chat::SendChatUseCase;
pub use submit_media::SubmitMediaUseCase;
pub use transition::RoomTransitionLock;
