//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame tagged by `type`; field names are camelCase.
//!
//! ```json
//! {"type":"play","atTime":12.5}
//! {"type":"renameRequest","desiredName":"alice"}
//! ```

use serde::{Deserialize, Serialize};

/// Events sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    SubmitMediaUrl { url: String },
    RequestState,
    Play { at_time: f64 },
    Pause { at_time: f64 },
    ReportProgress { at_time: f64 },
    RenameRequest { desired_name: String },
    SendChat { text: String },
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    RoomConnected {
        you: ParticipantDto,
        state: PlaybackStateDto,
        participants: Vec<ParticipantDto>,
    },
    StateUpdated {
        state: PlaybackStateDto,
    },
    Play {
        at_time: f64,
        by: String,
    },
    Pause {
        at_time: f64,
        by: String,
    },
    RosterUpdated {
        participants: Vec<ParticipantDto>,
    },
    Renamed {
        connection_id: String,
        old_name: String,
        new_name: String,
    },
    RenameRejected {
        desired_name: String,
        reason: String,
    },
    ChatBroadcast {
        message: ChatMessageDto,
    },
    MediaRejected {
        url: String,
        reason: String,
    },
    Error {
        reason: String,
    },
}

/// Participant information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub connection_id: String,
    pub display_name: String,
    pub color: String,
    /// Unix timestamp (milliseconds)
    pub connected_at: i64,
}

/// Playback state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateDto {
    pub media_url: String,
    pub media_title: String,
    pub provider: String,
    pub chosen_by: String,
    pub current_time: f64,
    pub playing: bool,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub author: String,
    pub color: String,
    pub text: String,
    /// Room playback position when the message was sent (seconds)
    pub playback_time: f64,
    /// Unix timestamp (milliseconds)
    pub sent_at: i64,
    pub notice: bool,
}
