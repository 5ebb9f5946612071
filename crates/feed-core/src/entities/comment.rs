//! Comment entity - a top-level comment on a post, or a reply to one

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
///
/// `parent_id` is `None` for top-level comments. Replies point at a top-level
/// comment; replies to replies are not allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            parent_id: None,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Create a reply to a top-level comment
    pub fn new_reply(
        id: Snowflake,
        post_id: Snowflake,
        parent_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, post_id, author_id, content)
        }
    }

    /// Check if this comment is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
