//! サーバー設定

use crate::infrastructure::metadata::MetadataConfig;

pub const DEFAULT_INITIAL_MEDIA_URL: &str = "https://www.youtube.com/watch?v=nnD8FKXzIGs";
pub const DEFAULT_INITIAL_MEDIA_TITLE: &str =
    "\"Yer a wizard, Harry\" | Harry Potter and the Philosopher's Stone";
pub const DEFAULT_INITIAL_CHOSEN_BY: &str = "Sajiki";

/// 起動時に流れているメディアと、メタデータ API の設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub metadata: MetadataConfig,
    pub initial_media_url: String,
    pub initial_media_title: String,
    /// 初期メディアの `chosenBy` に表示するラベル
    pub initial_chosen_by: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            metadata: MetadataConfig::default(),
            initial_media_url: DEFAULT_INITIAL_MEDIA_URL.to_string(),
            initial_media_title: DEFAULT_INITIAL_MEDIA_TITLE.to_string(),
            initial_chosen_by: DEFAULT_INITIAL_CHOSEN_BY.to_string(),
        }
    }
}
