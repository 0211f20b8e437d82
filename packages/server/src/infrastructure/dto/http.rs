//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::PlaybackStateDto;

/// Participant detail for the HTTP API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub connection_id: String,
    pub display_name: String,
    pub color: String,
    /// RFC 3339 (JST)
    pub connected_at: String,
}

/// Room snapshot: playback state and roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshotDto {
    pub state: PlaybackStateDto,
    pub participants: Vec<ParticipantDetailDto>,
}
