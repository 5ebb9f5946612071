//! Post entity - a piece of content published by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Who can see a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostVisibility {
    #[default]
    Public,
    Private,
}

/// Media attached to a post (already uploaded elsewhere)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMedia {
    pub public_id: String,
    pub url: String,
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub visibility: PostVisibility,
    pub media: Vec<PostMedia>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        visibility: PostVisibility,
        media: Vec<PostMedia>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            content,
            visibility,
            media,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the post is public
    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == PostVisibility::Public
    }

    /// A post is visible to everyone when public, otherwise only to its author
    #[inline]
    pub fn is_visible_to(&self, viewer_id: Snowflake) -> bool {
        self.is_public() || self.author_id == viewer_id
    }
}
