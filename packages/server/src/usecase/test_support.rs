//! UseCase テスト用のフィクスチャ

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sajiki_shared::time::FixedClock;

use crate::{
    domain::{
        ConnectionId, MediaReference, MessagePushError, MessagePusher, Participant,
        ParticipantRepository, PlaybackState, Provider, PusherChannel, RoomEvent, Timestamp,
    },
    infrastructure::repository::{InMemoryParticipantRepository, InMemoryPlaybackStateRepository},
    usecase::RoomTransitionLock,
};

pub const NOW: i64 = 1_700_000_000_000;

/// 配信先
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    To(ConnectionId),
    Broadcast(Vec<ConnectionId>),
}

/// 送信内容を記録するだけの MessagePusher
#[derive(Default)]
pub struct RecordingPusher {
    sent: Mutex<Vec<(Delivery, RoomEvent)>>,
    registered: Mutex<Vec<ConnectionId>>,
}

impl RecordingPusher {
    pub fn sent(&self) -> Vec<(Delivery, RoomEvent)> {
        self.sent.lock().unwrap().clone()
    }

    /// 指定した接続に届いたイベント（個別送信とブロードキャストの両方）
    pub fn received_by(&self, id: &ConnectionId) -> Vec<RoomEvent> {
        self.sent()
            .into_iter()
            .filter(|(delivery, _)| match delivery {
                Delivery::To(target) => target == id,
                Delivery::Broadcast(targets) => targets.contains(id),
            })
            .map(|(_, event)| event)
            .collect()
    }

    pub fn registered(&self) -> Vec<ConnectionId> {
        self.registered.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().unwrap().push(connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.registered.lock().unwrap().retain(|id| id != connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .unwrap()
            .push((Delivery::To(connection_id.clone()), event.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .unwrap()
            .push((Delivery::Broadcast(targets), event.clone()));
        Ok(())
    }
}

pub struct Fixture {
    pub participants: Arc<InMemoryParticipantRepository>,
    pub playback: Arc<InMemoryPlaybackStateRepository>,
    pub pusher: Arc<RecordingPusher>,
    pub clock: Arc<FixedClock>,
    pub transitions: RoomTransitionLock,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            participants: Arc::new(InMemoryParticipantRepository::new()),
            playback: Arc::new(InMemoryPlaybackStateRepository::new(initial_state())),
            pusher: Arc::new(RecordingPusher::default()),
            clock: Arc::new(FixedClock::new(NOW)),
            transitions: RoomTransitionLock::new(),
        }
    }

    /// 参加者を直接登録する（通知は発生しない）
    pub async fn join(&self, id: &str) -> Participant {
        self.participants
            .register(connection_id(id), Timestamp::new(NOW))
            .await
            .unwrap()
    }
}

pub fn connection_id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub fn initial_state() -> PlaybackState {
    PlaybackState::new(
        MediaReference::new(
            "https://www.youtube.com/watch?v=nnD8FKXzIGs",
            "Yer a wizard, Harry",
            Provider::YouTube,
        ),
        "sajiki",
    )
}
