use serde::{Deserialize, Serialize};

use crate::cache::FetchResult;
use crate::format::{format_views, parse_view_count};

/// Response of `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

/// One ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

/// Identifier of a search hit; only video hits carry `videoId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultId {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

/// Response of `GET /videos`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A video with statistics and snippet parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub snippet: Snippet,
}

/// Video statistics; the API sends counts as decimal strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "viewCount", default)]
    pub view_count: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail URLs keyed by resolution tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Thumbnails {
    /// Highest available tier: maxres, high, medium, default, else empty
    pub fn best_url(&self) -> &str {
        [&self.maxres, &self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url.as_str())
            .find(|url| !url.is_empty())
            .unwrap_or("")
    }
}

impl Video {
    /// Raw view count as sent by the API, `"0"` when absent
    pub fn raw_view_count(&self) -> &str {
        self.statistics.view_count.as_deref().unwrap_or("0")
    }

    /// Reduce the API payload to what gets cached and written out
    pub fn to_fetch_result(&self) -> FetchResult {
        let raw = self.raw_view_count();
        FetchResult {
            formatted_views: format_views(raw),
            raw_view_count: parse_view_count(raw).unwrap_or(0),
            thumbnail_url: self.snippet.thumbnails.best_url().to_string(),
            source_video_id: self.id.clone(),
            source_title: self.snippet.title.clone(),
        }
    }
}
