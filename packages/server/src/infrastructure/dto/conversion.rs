//! Conversion logic between domain entities and DTOs.

use sajiki_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{ChatMessage, Participant, PlaybackState, RoomEvent, RoomSnapshot};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Participant> for dto::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            display_name: model.display_name.as_str().to_string(),
            color: model.color.as_str().to_string(),
            connected_at: model.connected_at.value(),
        }
    }
}

impl From<&PlaybackState> for dto::PlaybackStateDto {
    fn from(model: &PlaybackState) -> Self {
        Self {
            media_url: model.media.url().to_string(),
            media_title: model.media.title().to_string(),
            provider: model.media.provider().as_str().to_string(),
            chosen_by: model.chosen_by.clone(),
            current_time: model.current_time.seconds(),
            playing: model.playing,
        }
    }
}

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            author: model.author.as_str().to_string(),
            color: model.color.as_str().to_string(),
            text: model.content.as_str().to_string(),
            playback_time: model.playback_time.seconds(),
            sent_at: model.sent_at.value(),
            notice: model.notice,
        }
    }
}

fn participant_dtos(participants: &[Participant]) -> Vec<dto::ParticipantDto> {
    participants.iter().map(dto::ParticipantDto::from).collect()
}

impl From<&RoomEvent> for dto::ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::RoomConnected {
                you,
                state,
                participants,
            } => Self::RoomConnected {
                you: you.into(),
                state: state.into(),
                participants: participant_dtos(participants),
            },
            RoomEvent::StateUpdated(state) => Self::StateUpdated {
                state: state.into(),
            },
            RoomEvent::Play { at, by } => Self::Play {
                at_time: at.seconds(),
                by: by.as_str().to_string(),
            },
            RoomEvent::Pause { at, by } => Self::Pause {
                at_time: at.seconds(),
                by: by.as_str().to_string(),
            },
            RoomEvent::RosterUpdated(participants) => Self::RosterUpdated {
                participants: participant_dtos(participants),
            },
            RoomEvent::Renamed {
                connection_id,
                old_name,
                new_name,
            } => Self::Renamed {
                connection_id: connection_id.as_str().to_string(),
                old_name: old_name.as_str().to_string(),
                new_name: new_name.as_str().to_string(),
            },
            RoomEvent::RenameRejected {
                desired_name,
                reason,
            } => Self::RenameRejected {
                desired_name: desired_name.clone(),
                reason: reason.clone(),
            },
            RoomEvent::ChatBroadcast(message) => Self::ChatBroadcast {
                message: message.into(),
            },
            RoomEvent::MediaRejected { url, reason } => Self::MediaRejected {
                url: url.clone(),
                reason: reason.clone(),
            },
            RoomEvent::InvalidRequest { reason } => Self::Error {
                reason: reason.clone(),
            },
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Participant> for http::ParticipantDetailDto {
    fn from(model: &Participant) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            display_name: model.display_name.as_str().to_string(),
            color: model.color.as_str().to_string(),
            connected_at: timestamp_to_jst_rfc3339(model.connected_at.value()),
        }
    }
}

impl From<&RoomSnapshot> for http::RoomSnapshotDto {
    fn from(model: &RoomSnapshot) -> Self {
        Self {
            state: (&model.state).into(),
            participants: model.participants.iter().map(Into::into).collect(),
        }
    }
}
