//! Core types for CommentGuard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A top-level comment as delivered by a comment source.
///
/// Comments are immutable once fetched; classification produces a separate
/// annotated record rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCommentRecord")]
pub struct RawComment {
    /// Display name of the comment author
    pub author: String,

    /// Avatar URL of the author, empty when the platform omits it
    pub author_profile_image: String,

    /// Comment body as plain text
    pub text: String,

    /// Number of likes on the comment
    pub like_count: u64,

    /// When the comment was first published
    pub published_at: DateTime<Utc>,

    /// When the comment was last edited
    pub updated_at: DateTime<Utc>,
}

impl RawComment {
    /// Create a comment that has never been edited
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author: author.into(),
            author_profile_image: String::new(),
            text: text.into(),
            like_count: 0,
            published_at,
            updated_at: published_at,
        }
    }

    /// Set the author avatar URL
    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.author_profile_image = url.into();
        self
    }

    /// Set the like count
    pub fn with_like_count(mut self, like_count: u64) -> Self {
        self.like_count = like_count;
        self
    }

    /// Set the last-edited timestamp
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

/// Wire shape of a comment where the avatar and edit time are optional.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCommentRecord {
    author: String,
    #[serde(default)]
    author_profile_image: String,
    text: String,
    #[serde(default)]
    like_count: u64,
    published_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<RawCommentRecord> for RawComment {
    fn from(record: RawCommentRecord) -> Self {
        Self {
            author: record.author,
            author_profile_image: record.author_profile_image,
            text: record.text,
            like_count: record.like_count,
            published_at: record.published_at,
            updated_at: record.updated_at.unwrap_or(record.published_at),
        }
    }
}

/// Basic information about a video
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Video title
    pub title: String,

    /// Name of the uploading channel
    pub channel_title: String,

    /// Publication timestamp as reported by the platform
    pub published_at: String,

    /// URL of the high-resolution thumbnail
    pub thumbnail: String,

    /// Aggregate comment count, absent when the platform hides it
    #[serde(serialize_with = "count_or_na")]
    pub comment_count: Option<u64>,

    /// Aggregate view count
    #[serde(serialize_with = "count_or_na")]
    pub view_count: Option<u64>,

    /// Aggregate like count
    #[serde(serialize_with = "count_or_na")]
    pub like_count: Option<u64>,
}

fn count_or_na<S: Serializer>(count: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    match count {
        Some(n) => serializer.serialize_str(&n.to_string()),
        None => serializer.serialize_str("N/A"),
    }
}
