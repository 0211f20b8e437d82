//! 外部メタデータ API クライアント
//!
//! - `http`: reqwest による `MetadataSource` 実装（YouTube Data API v3 / Graph API）

pub mod http;

use std::time::Duration;

pub use http::HttpMetadataSource;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(5);

/// メタデータ API の接続設定
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    pub youtube_base_url: String,
    pub graph_base_url: String,
    pub youtube_api_key: String,
    /// 空でもよい（その場合 Graph API はエラーを返し、rawId にフォールバックする）
    pub graph_access_token: String,
    pub timeout: Duration,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            youtube_base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            youtube_api_key: String::new(),
            graph_access_token: String::new(),
            timeout: DEFAULT_METADATA_TIMEOUT,
        }
    }
}
