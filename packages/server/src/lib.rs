//! Sajiki watch-together server library.
//!
//! One room of participants watches the same media with synchronized playback
//! while chatting. Each client holds a single WebSocket connection.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod bootstrap;
pub mod config;
