//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{debug_room_state, get_room, health_check};
pub use websocket::websocket_handler;
