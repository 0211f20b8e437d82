//! Data Transfer Objects (DTOs) for Sajiki.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (client → server, server → client)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
