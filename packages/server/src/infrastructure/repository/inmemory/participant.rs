//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! [`ParticipantRegistry`] 集約をそのままストレージとして使用します。
//!
//! ## 識別子について
//!
//! 参加者は払い出された `ConnectionId` をキーに保持し、表示名は属性として
//! 持ちます。改名でキーを付け替えることはありません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, Participant, ParticipantRegistry, ParticipantRepository,
    RepositoryError, Timestamp,
};

/// インメモリ Participant Repository 実装
pub struct InMemoryParticipantRepository {
    registry: Arc<Mutex<ParticipantRegistry>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(ParticipantRegistry::new())),
        }
    }
}

impl Default for InMemoryParticipantRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn register(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let participant = registry.register(connection_id, connected_at)?;
        tracing::debug!(
            "Participant '{}' registered with color {} ({} connected)",
            participant.connection_id,
            participant.color.as_str(),
            registry.len()
        );
        Ok(participant)
    }

    async fn rename(
        &self,
        connection_id: &ConnectionId,
        desired_name: DisplayName,
    ) -> Result<(DisplayName, Participant), RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry.rename(connection_id, desired_name)
    }

    async fn unregister(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry
            .unregister(connection_id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(connection_id.to_string()))
    }

    async fn find(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let registry = self.registry.lock().await;
        registry.find(connection_id).cloned()
    }

    async fn roster(&self) -> Vec<Participant> {
        let registry = self.registry.lock().await;
        registry.roster()
    }

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry
            .roster()
            .into_iter()
            .map(|p| p.connection_id)
            .collect()
    }
}
