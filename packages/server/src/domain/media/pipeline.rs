//! Media Resolution Pipeline: URL → MediaReference

use crate::domain::{MediaReference, Provider, UnresolvableMediaError};

use super::{Classification, MetadataFetcher, classify};

/// URL の分類とタイトル取得を 1 つの非同期処理にまとめたもの
pub struct MediaResolutionPipeline {
    fetcher: MetadataFetcher,
}

impl MediaResolutionPipeline {
    pub fn new(fetcher: MetadataFetcher) -> Self {
        Self { fetcher }
    }

    /// URL を解決する
    ///
    /// 識別子が取り出せない場合のみ失敗する。メタデータ取得の失敗は
    /// 生の識別子をタイトルにして成功として返す。
    pub async fn resolve(&self, url: &str) -> Result<MediaReference, UnresolvableMediaError> {
        let url = url.trim();
        let Classification { provider, raw_id } = classify(url);
        let Some(raw_id) = raw_id else {
            return Err(UnresolvableMediaError {
                url: url.to_string(),
            });
        };

        let title = match self.fetcher.fetch(provider, &raw_id).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch {} metadata for '{}', falling back to identifier: {}",
                    provider.as_str(),
                    raw_id,
                    e
                );
                raw_id
            }
        };

        tracing::debug!(
            "Resolved '{}' as {} media titled '{}'",
            url,
            provider.as_str(),
            title
        );
        Ok(MediaReference::new(url, title, provider))
    }

    /// 分類だけを行う（ネットワークなし）
    pub fn provider_of(url: &str) -> Provider {
        classify(url.trim()).provider
    }
}
