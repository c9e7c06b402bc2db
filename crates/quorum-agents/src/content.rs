//! Content items submitted for moderation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The medium of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Plain text post or comment.
    Text,
    /// Image upload.
    Image,
    /// Video upload.
    Video,
    /// External link.
    Link,
}

/// One piece of user content, immutable once submitted for coordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier.
    pub id: String,
    /// Identifier of the author.
    pub author_id: String,
    /// Community the content was posted in.
    pub community_id: String,
    /// The medium.
    pub content_type: ContentType,
    /// Raw content text (caption/transcript for non-text media).
    pub body: String,
    /// Submission time.
    pub timestamp: DateTime<Utc>,
    /// BCP-47 language tag of the content.
    pub language: String,
}

impl ContentItem {
    /// Creates a text content item timestamped now.
    pub fn text(
        id: impl Into<String>,
        author_id: impl Into<String>,
        community_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            community_id: community_id.into(),
            content_type: ContentType::Text,
            body: body.into(),
            timestamp: Utc::now(),
            language: "en".to_string(),
        }
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Sets the language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}
