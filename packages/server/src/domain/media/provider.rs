//! Provider Resolver: URL の分類と識別子の抽出
//!
//! 判定は上から順に行い、最初に一致したものを採用する。
//! YouTube → SoundCloud → Twitch → Generic

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Provider;

/// YouTube の動画 ID（11 文字）を含みうる URL 形状
///
/// `watch?v=`, `youtu.be/`, `/v/`, `/embed/`, `/u/<x>/`
static YOUTUBE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*")
        .expect("YouTube id pattern is a valid regex")
});

const YOUTUBE_ID_LEN: usize = 11;

/// 分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub provider: Provider,
    /// 生の識別子。取り出せなかった場合は `None`（未解決として扱う）
    pub raw_id: Option<String>,
}

/// URL をプロバイダごとに分類し、生の識別子を取り出す
///
/// ネットワークアクセスは行わない。
pub fn classify(url: &str) -> Classification {
    if url.contains("youtube.com") || url.contains("youtu.be/") {
        Classification {
            provider: Provider::YouTube,
            raw_id: youtube_id(url),
        }
    } else if url.contains("soundcloud.com") {
        Classification {
            provider: Provider::SoundCloud,
            raw_id: non_empty(soundcloud_title(url)),
        }
    } else if url.contains("twitch.tv") {
        Classification {
            provider: Provider::Twitch,
            raw_id: non_empty(twitch_channel(url).to_string()),
        }
    } else {
        Classification {
            provider: Provider::Generic,
            raw_id: non_empty(last_path_segment(url).to_string()),
        }
    }
}

fn youtube_id(url: &str) -> Option<String> {
    let id = YOUTUBE_ID_PATTERN.captures(url)?.get(7)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// 最後のパスセグメントからクエリを除き、`-` を空白に置き換えたもの
///
/// SoundCloud は API を叩かず、これをそのままタイトルとして使う。
fn soundcloud_title(url: &str) -> String {
    let segment = last_path_segment(url);
    let slug = segment.split('?').next().unwrap_or_default();
    slug.replace('-', " ")
}

/// 最初の `tv/` より後ろ（通常はチャンネル名）
fn twitch_channel(url: &str) -> &str {
    url.split_once("tv/").map_or(url, |(_, rest)| rest)
}

/// 末尾のスラッシュは無視する
fn last_path_segment(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
