//! YouTube Data API comment source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use commentguard_core::{RawComment, VideoInfo};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ServerConfig;

/// Maximum page size accepted by `commentThreads.list`
const MAX_PAGE_SIZE: usize = 100;

/// Errors raised by a comment source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("video not found")]
    VideoNotFound,

    #[error("comments are disabled for this video")]
    CommentsDisabled,

    #[error("quota exceeded")]
    QuotaExceeded,

    #[error("YouTube API key is not configured")]
    MissingApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Source of comments and video metadata
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch up to `max_comments` top-level comments in relevance order
    async fn fetch_comments(
        &self,
        video_id: &str,
        max_comments: usize,
    ) -> Result<Vec<RawComment>, SourceError>;

    /// Fetch video metadata, `None` when the video does not exist
    async fn fetch_video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, SourceError>;

    /// Whether the source has the credentials it needs
    fn is_configured(&self) -> bool {
        true
    }
}

/// Comment source backed by the YouTube Data API v3
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeClient {
    /// Create a client from server configuration
    pub fn new(config: &ServerConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.youtube_api_url.trim_end_matches('/').to_string(),
            api_key: config.youtube_api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let key = self.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(
        &self,
        video_id: &str,
        max_comments: usize,
    ) -> Result<Vec<RawComment>, SourceError> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;

        while comments.len() < max_comments {
            let page_size = MAX_PAGE_SIZE.min(max_comments - comments.len());
            let mut query = vec![
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
                ("maxResults", page_size.to_string()),
                ("order", "relevance".to_string()),
                ("textFormat", "plainText".to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page: CommentThreadList = self.get("commentThreads", &query).await?;
            debug!(video_id, fetched = page.items.len(), "Fetched comment page");

            comments.extend(page.items.into_iter().map(|item| {
                let snippet = item.snippet.top_level_comment.snippet;
                RawComment {
                    author: snippet.author_display_name,
                    author_profile_image: snippet.author_profile_image_url.unwrap_or_default(),
                    text: snippet.text_display,
                    like_count: snippet.like_count,
                    published_at: snippet.published_at,
                    updated_at: snippet.updated_at.unwrap_or(snippet.published_at),
                }
            }));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        comments.truncate(max_comments);
        Ok(comments)
    }

    async fn fetch_video_info(&self, video_id: &str) -> Result<Option<VideoInfo>, SourceError> {
        let query = [
            ("part", "snippet,statistics".to_string()),
            ("id", video_id.to_string()),
        ];

        let list: VideoList = match self.get("videos", &query).await {
            Ok(list) => list,
            Err(SourceError::VideoNotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(list.items.into_iter().next().map(|video| VideoInfo {
            title: video.snippet.title,
            channel_title: video.snippet.channel_title,
            published_at: video.snippet.published_at,
            thumbnail: video
                .snippet
                .thumbnails
                .high
                .map(|t| t.url)
                .unwrap_or_default(),
            comment_count: parse_count(video.statistics.comment_count),
            view_count: parse_count(video.statistics.view_count),
            like_count: parse_count(video.statistics.like_count),
        }))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_count(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.parse().ok())
}

/// Map a YouTube error response to a source error
pub fn classify_api_error(status: StatusCode, body: &str) -> SourceError {
    let parsed: Option<ApiErrorResponse> = serde_json::from_str(body).ok();
    let reasons: Vec<String> = parsed
        .as_ref()
        .map(|r| r.error.errors.iter().map(|e| e.reason.clone()).collect())
        .unwrap_or_default();
    let has_reason = |reason: &str| reasons.iter().any(|r| r == reason) || body.contains(reason);

    if has_reason("commentsDisabled") {
        return SourceError::CommentsDisabled;
    }
    if has_reason("quotaExceeded") {
        return SourceError::QuotaExceeded;
    }
    if has_reason("videoNotFound") || status == StatusCode::NOT_FOUND {
        return SourceError::VideoNotFound;
    }

    let message = parsed
        .map(|r| r.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());
    warn!(status = status.as_u16(), %message, "YouTube API request failed");
    SourceError::Api {
        status: status.as_u16(),
        message,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadList {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: String,
    author_profile_image_url: Option<String>,
    text_display: String,
    #[serde(default)]
    like_count: u64,
    published_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct VideoList {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Deserialize)]
struct Video {
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    title: String,
    channel_title: String,
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    comment_count: Option<String>,
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_body(reason: &str) -> String {
        format!(
            r#"{{"error": {{"code": 403, "message": "The request failed.", "errors": [{{"reason": "{reason}", "domain": "youtube.commentThread"}}]}}}}"#
        )
    }

    #[test]
    fn test_comments_disabled() {
        let err = classify_api_error(StatusCode::FORBIDDEN, &error_body("commentsDisabled"));
        assert!(matches!(err, SourceError::CommentsDisabled));
    }

    #[test]
    fn test_quota_exceeded() {
        let err = classify_api_error(StatusCode::FORBIDDEN, &error_body("quotaExceeded"));
        assert!(matches!(err, SourceError::QuotaExceeded));
    }

    #[test]
    fn test_not_found() {
        let err = classify_api_error(StatusCode::NOT_FOUND, &error_body("videoNotFound"));
        assert!(matches!(err, SourceError::VideoNotFound));
        let err = classify_api_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, SourceError::VideoNotFound));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let err = classify_api_error(StatusCode::BAD_REQUEST, &error_body("badRequest"));
        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The request failed.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_comment_thread_parsing() {
        let json = r#"{
            "nextPageToken": "abc",
            "items": [{
                "snippet": {"topLevelComment": {"snippet": {
                    "authorDisplayName": "@viewer",
                    "textDisplay": "hello",
                    "likeCount": 4,
                    "publishedAt": "2024-03-01T10:00:00Z"
                }}}
            }]
        }"#;
        let page: CommentThreadList = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));
        let snippet = &page.items[0].snippet.top_level_comment.snippet;
        assert_eq!(snippet.author_display_name, "@viewer");
        assert!(snippet.author_profile_image_url.is_none());
        assert!(snippet.updated_at.is_none());
    }

    #[test]
    fn test_missing_key_reports_unconfigured() {
        let client = YouTubeClient::new(&ServerConfig::default()).unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("1234".to_string())), Some(1234));
        assert_eq!(parse_count(Some("hidden".to_string())), None);
        assert_eq!(parse_count(None), None);
    }
}
