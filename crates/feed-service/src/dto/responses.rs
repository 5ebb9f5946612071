//! Response DTOs
//!
//! All response DTOs implement `Serialize`. Ids are rendered as strings.

use chrono::{DateTime, Utc};
use feed_core::{PostVisibility, ReactionType, Snowflake};
use serde::Serialize;

// ============================================================================
// Pagination
// ============================================================================

/// A page of results with its cursor metadata
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Cursor metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub has_next: bool,
    /// Pass back as `cursor` to fetch the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, next_cursor: Option<Snowflake>) -> Self {
        Self {
            data,
            meta: PageMeta {
                has_next: next_cursor.is_some(),
                next_cursor: next_cursor.map(|id| id.to_string()),
            },
        }
    }

    /// Build a page from `limit + 1` fetched rows
    ///
    /// The extra row is dropped and its id becomes the next cursor.
    pub fn from_overfetch<F>(mut rows: Vec<T>, limit: i64, id_of: F) -> Self
    where
        F: Fn(&T) -> Snowflake,
    {
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let next_cursor = rows.get(limit).map(&id_of);
        rows.truncate(limit);
        Self::new(rows, next_cursor)
    }

    /// Replace the items, keeping the cursor metadata
    pub fn with_data<U>(self, data: Vec<U>) -> Page<U> {
        Page {
            data,
            meta: self.meta,
        }
    }
}

// ============================================================================
// Author / Reaction Responses
// ============================================================================

/// Author summary
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// One reaction with its author
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub reaction_type: ReactionType,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post / Comment Responses
// ============================================================================

/// Media attached to a post
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub public_id: String,
    pub url: String,
}

/// Reply under a top-level comment
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: String,
    pub parent_id: String,
    pub author: AuthorResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reactions: Vec<ReactionResponse>,
    pub total_reactions: i64,
    pub total_replies: i64,
}

/// Top-level comment with its reply preview
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: AuthorResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub reactions: Vec<ReactionResponse>,
    pub replies: Vec<ReplyResponse>,
    pub total_reactions: i64,
    pub total_replies: i64,
}

/// Post as shown to a viewer
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author: AuthorResponse,
    pub content: String,
    pub visibility: PostVisibility,
    pub media: Vec<MediaResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reactions: Vec<ReactionResponse>,
    pub comments: Vec<CommentResponse>,
    pub total_reactions: i64,
    pub total_comments: i64,
}
