//! reqwest を使った MetadataSource 実装

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::MetadataConfig;
use crate::domain::{MetadataSource, ResolutionError};

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct GraphObject {
    name: String,
}

/// YouTube Data API v3 と Graph API を叩く HTTP クライアント
pub struct HttpMetadataSource {
    client: Client,
    config: MetadataConfig,
}

impl HttpMetadataSource {
    pub fn new(config: MetadataConfig) -> Result<Self, ResolutionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ResolutionError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn videos_url(&self) -> String {
        format!("{}/videos", self.config.youtube_base_url.trim_end_matches('/'))
    }

    /// `{base}/{id}` を組み立てる。id はパスセグメントとしてエンコードされる。
    fn graph_url(&self, id: &str) -> Result<Url, ResolutionError> {
        let mut url = Url::parse(&self.config.graph_base_url)
            .map_err(|e| ResolutionError::Request(format!("invalid graph base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ResolutionError::Request("graph base url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ResolutionError> {
        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ResolutionError::MalformedBody(e.to_string())
            } else {
                map_transport_error(e, self.config.timeout)
            }
        })
    }
}

fn map_transport_error(error: reqwest::Error, timeout: Duration) -> ResolutionError {
    if error.is_timeout() {
        ResolutionError::Timeout(timeout)
    } else {
        ResolutionError::Request(error.to_string())
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn youtube_title(&self, video_id: &str) -> Result<String, ResolutionError> {
        let request = self.client.get(self.videos_url()).query(&[
            ("part", "snippet"),
            ("id", video_id),
            ("key", self.config.youtube_api_key.as_str()),
        ]);

        let list: VideoListResponse = self.get_json(request).await?;
        list.items
            .into_iter()
            .next()
            .map(|item| item.snippet.title)
            .ok_or(ResolutionError::EmptyResult)
    }

    async fn graph_name(&self, object_id: &str) -> Result<String, ResolutionError> {
        let url = self.graph_url(object_id)?;
        let request = self.client.get(url).query(&[
            ("fields", "name"),
            ("access_token", self.config.graph_access_token.as_str()),
        ]);

        let object: GraphObject = self.get_json(request).await?;
        if object.name.trim().is_empty() {
            return Err(ResolutionError::EmptyResult);
        }
        Ok(object.name)
    }
}
