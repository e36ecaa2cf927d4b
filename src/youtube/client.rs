use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

use super::types::*;
use crate::config::{Config, SearchConfig};
use crate::error::{PulseError, Result};

const USER_AGENT: &str = concat!("gamepulse/", env!("CARGO_PKG_VERSION"));

/// Blocking YouTube Data API v3 client
///
/// Holds the HTTP session for the lifetime of the poller; dropping it
/// releases pooled connections.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
    search: SearchConfig,
}

impl YouTubeClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::with_key(api_key, config)
    }

    /// Create a new client with an explicit key
    pub fn with_key(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.poll.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            search: config.search.clone(),
        })
    }

    /// Make a GET request to the API, appending the key to the query
    fn get<T: serde::de::DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().copied())
            .append_pair("key", &self.api_key)
            .finish();

        debug!("GET {}{} {:?}", self.base_url, path, params);

        let url = format!("{}{path}?{query}", self.base_url);
        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PulseError::from_status(status.as_u16(), error_message(&body)));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(PulseError::Json)
    }

    /// Search videos matching `query`, ranked per the configured order
    pub fn search(&self, query: &str) -> Result<SearchListResponse> {
        let max_results = self.search.max_results.to_string();
        self.get(
            "/search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoCategoryId", self.search.category_id.as_str()),
                ("order", self.search.order.as_str()),
                ("maxResults", max_results.as_str()),
                ("relevanceLanguage", self.search.language.as_str()),
            ],
        )
    }

    /// Get statistics and snippet for one video
    pub fn video_details(&self, video_id: &str) -> Result<VideoListResponse> {
        self.get(
            "/videos",
            &[("part", "statistics,snippet"), ("id", video_id)],
        )
    }

    /// Resolve the top-ranked search hit for `query` into a full video
    ///
    /// Returns `Ok(None)` when the search has no video hits or the
    /// details lookup comes back empty.
    pub fn most_viewed(&self, query: &str) -> Result<Option<Video>> {
        let response = self.search(query)?;

        let Some(video_id) = response
            .items
            .into_iter()
            .next()
            .and_then(|hit| hit.id.video_id)
        else {
            return Ok(None);
        };

        let details = self.video_details(&video_id)?;
        Ok(details.items.into_iter().next())
    }
}

/// Pull `error.message` out of a Google API error body, or fall back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn make_client(server: &Server) -> YouTubeClient {
        let mut config = Config::default();
        config.api.base_url = server.url();
        YouTubeClient::with_key("test-key", &config).unwrap()
    }

    fn search_body(ids: &[&str]) -> String {
        let items: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({"id": {"kind": "youtube#video", "videoId": id}}))
            .collect();
        serde_json::json!({ "items": items }).to_string()
    }

    fn video_body(id: &str, views: &str) -> String {
        serde_json::json!({
            "items": [{
                "id": id,
                "snippet": {
                    "title": "Top video",
                    "thumbnails": {"high": {"url": "http://img/high.jpg"}}
                },
                "statistics": {"viewCount": views}
            }]
        })
        .to_string()
    }

    #[test]
    fn test_search_sends_ranking_options_and_key() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet".into()),
                Matcher::UrlEncoded("q".into(), "GTA V gameplay".into()),
                Matcher::UrlEncoded("type".into(), "video".into()),
                Matcher::UrlEncoded("videoCategoryId".into(), "20".into()),
                Matcher::UrlEncoded("order".into(), "viewCount".into()),
                Matcher::UrlEncoded("maxResults".into(), "5".into()),
                Matcher::UrlEncoded("relevanceLanguage".into(), "en".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_body(&["v1", "v2"]))
            .create();

        let client = make_client(&server);
        let response = client.search("GTA V gameplay").unwrap();

        mock.assert();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].id.video_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_most_viewed_picks_first_hit() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(search_body(&["first", "second"]))
            .create();
        let details = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "first".into()),
                Matcher::UrlEncoded("part".into(), "statistics,snippet".into()),
            ]))
            .with_status(200)
            .with_body(video_body("first", "1234567"))
            .create();

        let client = make_client(&server);
        let video = client.most_viewed("GTA V gameplay").unwrap().unwrap();

        details.assert();
        assert_eq!(video.id, "first");
        assert_eq!(video.to_fetch_result().formatted_views, "1.2M views");
    }

    #[test]
    fn test_most_viewed_empty_search_is_none() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create();
        let details = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .expect(0)
            .create();

        let client = make_client(&server);
        assert!(client.most_viewed("nothing").unwrap().is_none());
        details.assert();
    }

    #[test]
    fn test_quota_exceeded_maps_to_error() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#)
            .create();

        let client = make_client(&server);
        assert!(matches!(
            client.search("q"),
            Err(PulseError::QuotaExceeded)
        ));
    }

    #[test]
    fn test_rate_limit_maps_to_error() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .create();

        let client = make_client(&server);
        assert!(matches!(client.search("q"), Err(PulseError::RateLimited)));
    }

    #[test]
    fn test_server_error_carries_api_message() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": {"code": 500, "message": "Backend Error"}}"#)
            .create();

        let client = make_client(&server);
        match client.search("q") {
            Err(PulseError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Backend Error");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.items.len())),
        }
    }

    #[test]
    fn test_malformed_payload_is_json_error() {
        let mut server = Server::new();
        let _search = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let client = make_client(&server);
        assert!(matches!(client.search("q"), Err(PulseError::Json(_))));
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("plain text"), "plain text");
        assert_eq!(
            error_message(r#"{"error": {"message": "bad key"}}"#),
            "bad key"
        );
    }
}
