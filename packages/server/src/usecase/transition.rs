//! ルーム全体の遷移ロック
//!
//! 状態の変更と、その結果の配信を 1 つのクリティカルセクションで行うためのロック。
//! 変更と配信を伴うユースケースは全て同じインスタンスを共有する。
//! 配信の到着順は、状態に適用された順と一致する。
//!
//! メタデータ取得のような時間のかかる処理の間は保持しないこと。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// 変更系ユースケースが共有するロック
#[derive(Clone, Default)]
pub struct RoomTransitionLock {
    inner: Arc<Mutex<()>>,
}

impl RoomTransitionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// ガードを保持している間、他の遷移は待たされる
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
