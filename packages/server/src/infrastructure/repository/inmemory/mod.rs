//! インメモリ実装
//!
//! 各 Repository は自分の集約を `tokio::sync::Mutex` で保持し、1 メソッド = 1 回の
//! ロック取得で遷移を完結させます。

mod participant;
mod playback_state;

pub use participant::InMemoryParticipantRepository;
pub use playback_state::InMemoryPlaybackStateRepository;
