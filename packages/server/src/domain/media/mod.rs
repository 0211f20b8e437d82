//! メディア解決
//!
//! 1. [`classify`]: URL からプロバイダと生の識別子を取り出す（純粋関数）
//! 2. [`MetadataFetcher`]: プロバイダのメタデータ API からタイトルを得る
//! 3. [`MediaResolutionPipeline`]: 1 と 2 を合成して [`MediaReference`] を作る
//!
//! [`MediaReference`]: super::MediaReference

mod metadata;
mod pipeline;
mod provider;

#[cfg(test)]
pub use metadata::MockMetadataSource;
pub use metadata::{MetadataFetcher, MetadataSource};
pub use pipeline::MediaResolutionPipeline;
pub use provider::{Classification, classify};
