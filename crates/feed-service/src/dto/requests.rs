//! Request DTOs
//!
//! Bodies implement `Deserialize` and `Validate`; query strings are parsed
//! into their domain counterparts with `TryFrom`.

use feed_common::FeedConfig;
use feed_core::{PageQuery, PostMedia, PostVisibility, ReactionType, Snowflake, SortOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::ServiceError;

// ============================================================================
// Post Requests
// ============================================================================

/// Media entry of a new post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MediaRequest {
    #[validate(length(min = 1, message = "Media public_id is required"))]
    pub public_id: String,

    #[validate(length(min = 1, message = "Media url is required"))]
    pub url: String,
}

impl From<MediaRequest> for PostMedia {
    fn from(media: MediaRequest) -> Self {
        Self {
            public_id: media.public_id,
            url: media.url,
        }
    }
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Post content must be 1-5000 characters"))]
    pub content: String,

    /// Defaults to PUBLIC
    #[serde(default)]
    pub visibility: PostVisibility,

    #[serde(default)]
    #[validate(length(max = 10, message = "A post can carry at most 10 media"), nested)]
    pub media: Vec<MediaRequest>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Comment on a post, or reply to one of its comments
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub comment: String,

    /// Top-level comment being replied to (Snowflake as string)
    #[serde(default)]
    pub parent_comment_id: Option<String>,
}

impl CommentRequest {
    /// Parsed parent id, if any
    pub fn parent_id(&self) -> Result<Option<Snowflake>, ServiceError> {
        self.parent_comment_id
            .as_deref()
            .map(|raw| {
                raw.parse::<Snowflake>()
                    .map_err(|_| ServiceError::validation("Invalid parent_comment_id"))
            })
            .transpose()
    }
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// React with a type, or send no type to remove the reaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionRequest {
    #[serde(default)]
    pub reaction_type: Option<ReactionType>,
}

// ============================================================================
// Pagination
// ============================================================================

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// First item of the page (inclusive)
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

impl PageParams {
    /// Validate against the configured page sizes
    pub fn into_query(self, feed: &FeedConfig) -> Result<PageQuery, ServiceError> {
        let cursor = self
            .cursor
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ServiceError::validation("Invalid 'cursor' format"))
            })
            .transpose()?;

        let limit = self
            .limit
            .unwrap_or(feed.default_page_size)
            .clamp(1, feed.max_page_size);

        Ok(PageQuery {
            cursor,
            limit,
            order: self.order.unwrap_or_default(),
        })
    }
}

impl TryFrom<PageParams> for PageQuery {
    type Error = ServiceError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        params.into_query(&FeedConfig::default())
    }
}
