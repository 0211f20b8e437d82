//! Metadata Fetcher: プロバイダ + 識別子 → 表示タイトル

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::domain::{Provider, ResolutionError};

/// 外部メタデータ API のインターフェース
///
/// 具体的な実装（HTTP クライアント）は Infrastructure 層が提供します。
/// 非 2xx・不正なボディ・空の結果はすべて `Err` として返してください。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// YouTube 動画 ID から最初の結果のタイトルを取得
    async fn youtube_title(&self, video_id: &str) -> Result<String, ResolutionError>;

    /// Graph API のオブジェクト ID から `name` を取得
    async fn graph_name(&self, object_id: &str) -> Result<String, ResolutionError>;
}

/// プロバイダごとにタイトルの決め方を切り替える
///
/// | provider   | 取得方法                 | 失敗時                     |
/// |------------|--------------------------|----------------------------|
/// | YouTube    | `youtube_title`          | `Err(ResolutionError)`     |
/// | SoundCloud | 生の識別子をそのまま使う | -                          |
/// | Twitch     | 生の識別子をそのまま使う | -                          |
/// | Generic    | `graph_name`             | 生の識別子（ログのみ残す） |
pub struct MetadataFetcher {
    source: Arc<dyn MetadataSource>,
    timeout: Duration,
}

impl MetadataFetcher {
    pub fn new(source: Arc<dyn MetadataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub async fn fetch(&self, provider: Provider, raw_id: &str) -> Result<String, ResolutionError> {
        match provider {
            Provider::YouTube => self.bounded(self.source.youtube_title(raw_id)).await,
            Provider::SoundCloud | Provider::Twitch => Ok(raw_id.to_string()),
            Provider::Generic => match self.bounded(self.source.graph_name(raw_id)).await {
                Ok(name) => Ok(name),
                Err(e) => {
                    tracing::warn!(
                        "Graph lookup for '{}' failed, using the identifier as title: {}",
                        raw_id,
                        e
                    );
                    Ok(raw_id.to_string())
                }
            },
        }
    }

    async fn bounded<F>(&self, request: F) -> Result<String, ResolutionError>
    where
        F: Future<Output = Result<String, ResolutionError>>,
    {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ResolutionError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// 応答までに時間がかかる MetadataSource
    struct SlowSource(Duration);

    #[async_trait]
    impl MetadataSource for SlowSource {
        async fn youtube_title(&self, _video_id: &str) -> Result<String, ResolutionError> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }

        async fn graph_name(&self, _object_id: &str) -> Result<String, ResolutionError> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_youtube_title_from_source() {
        // テスト項目: YouTube はメタデータ API のタイトルを返す
        // given (前提条件):
        let mut source = MockMetadataSource::new();
        source
            .expect_youtube_title()
            .times(1)
            .returning(|_| Ok("Yer a wizard, Harry".to_string()));
        let fetcher = MetadataFetcher::new(Arc::new(source), TIMEOUT);

        // when (操作):
        let result = fetcher.fetch(Provider::YouTube, "nnD8FKXzIGs").await;

        // then (期待する結果):
        assert_eq!(result, Ok("Yer a wizard, Harry".to_string()));
    }

    #[tokio::test]
    async fn test_youtube_failure_is_surfaced() {
        // テスト項目: YouTube の取得失敗は ResolutionError として呼び出し元に返る
        // given (前提条件):
        let mut source = MockMetadataSource::new();
        source
            .expect_youtube_title()
            .returning(|_| Err(ResolutionError::EmptyResult));
        let fetcher = MetadataFetcher::new(Arc::new(source), TIMEOUT);

        // when (操作):
        let result = fetcher.fetch(Provider::YouTube, "nnD8FKXzIGs").await;

        // then (期待する結果):
        assert_eq!(result, Err(ResolutionError::EmptyResult));
    }

    #[tokio::test]
    async fn test_soundcloud_and_twitch_make_no_request() {
        // テスト項目: SoundCloud と Twitch は API を呼ばず識別子をそのまま返す
        // given (前提条件):
        let mut source = MockMetadataSource::new();
        source.expect_youtube_title().never();
        source.expect_graph_name().never();
        let fetcher = MetadataFetcher::new(Arc::new(source), TIMEOUT);

        // when (操作):
        let soundcloud = fetcher.fetch(Provider::SoundCloud, "my cool track").await;
        let twitch = fetcher.fetch(Provider::Twitch, "streamer").await;

        // then (期待する結果):
        assert_eq!(soundcloud, Ok("my cool track".to_string()));
        assert_eq!(twitch, Ok("streamer".to_string()));
    }

    #[tokio::test]
    async fn test_generic_uses_graph_name() {
        // テスト項目: Generic は Graph API の name を返す
        // given (前提条件):
        let mut source = MockMetadataSource::new();
        source
            .expect_graph_name()
            .times(1)
            .returning(|_| Ok("Birthday party".to_string()));
        let fetcher = MetadataFetcher::new(Arc::new(source), TIMEOUT);

        // when (操作):
        let result = fetcher.fetch(Provider::Generic, "1234567890").await;

        // then (期待する結果):
        assert_eq!(result, Ok("Birthday party".to_string()));
    }

    #[tokio::test]
    async fn test_generic_falls_back_to_identifier() {
        // テスト項目: Generic の取得失敗は識別子をタイトルとして成功扱いにする
        // given (前提条件):
        let mut source = MockMetadataSource::new();
        source
            .expect_graph_name()
            .returning(|_| Err(ResolutionError::Status(400)));
        let fetcher = MetadataFetcher::new(Arc::new(source), TIMEOUT);

        // when (操作):
        let result = fetcher.fetch(Provider::Generic, "1234567890").await;

        // then (期待する結果):
        assert_eq!(result, Ok("1234567890".to_string()));
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        // テスト項目: 応答が遅い場合はタイムアウトとして ResolutionError になる
        // given (前提条件):
        let timeout = Duration::from_millis(50);
        let fetcher = MetadataFetcher::new(Arc::new(SlowSource(Duration::from_secs(5))), timeout);

        // when (操作):
        let youtube = fetcher.fetch(Provider::YouTube, "nnD8FKXzIGs").await;
        let generic = fetcher.fetch(Provider::Generic, "1234567890").await;

        // then (期待する結果):
        assert_eq!(youtube, Err(ResolutionError::Timeout(timeout)));
        assert_eq!(generic, Ok("1234567890".to_string()));
    }
}
