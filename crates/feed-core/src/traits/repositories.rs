//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Tree loaders (`find_tree`, `find_trees`, `find_trees_by_post`) return
//! previews ordered newest first and sized by the `PreviewCaps` they are
//! given. A loader may append the viewer's most recent authored top-level
//! comment (and, per comment, the viewer's most recent reply) when it fell
//! outside the cap, so those lists can hold cap + 1 candidates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engagement::PreviewCaps;
use crate::entities::{
    Author, Comment, CommentTree, Post, PostTree, Reaction, ReactionEntry, ReactionTarget,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pagination
// ============================================================================

/// Ordering by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Cursor pagination options
///
/// Implementations return at most `limit + 1` rows, starting at `cursor`
/// (inclusive) when one is given. The extra row tells the caller whether a
/// next page exists and becomes its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub cursor: Option<Snowflake>,
    pub limit: i64,
    pub order: SortOrder,
}

impl PageQuery {
    pub fn first(limit: i64) -> Self {
        Self {
            cursor: None,
            limit,
            order: SortOrder::Desc,
        }
    }

    /// Number of rows a repository should fetch
    #[inline]
    pub fn fetch_limit(&self) -> i64 {
        self.limit + 1
    }
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Load one post with its previews as seen by `viewer_id`
    ///
    /// Visibility is not applied here; callers check `Post::is_visible_to`.
    async fn find_tree(
        &self,
        id: Snowflake,
        viewer_id: Snowflake,
        caps: PreviewCaps,
    ) -> RepoResult<Option<PostTree>>;

    /// Load a page of posts visible to `viewer_id`, optionally by one author
    async fn find_trees(
        &self,
        viewer_id: Snowflake,
        author_id: Option<Snowflake>,
        query: PageQuery,
        caps: PreviewCaps,
    ) -> RepoResult<Vec<PostTree>>;

    /// Create a new post (with its media)
    async fn create(&self, post: &Post) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment or reply by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Create a new comment or reply
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Load a page of top-level comments on a post, each with its previews
    async fn find_trees_by_post(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
        query: PageQuery,
        caps: PreviewCaps,
    ) -> RepoResult<Vec<CommentTree>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert the reaction, or replace the type of the author's existing one
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove the author's reaction on a target (no-op when absent)
    async fn delete(&self, target: ReactionTarget, author_id: Snowflake) -> RepoResult<()>;

    /// List reactions on a target, newest first by default
    ///
    /// Reactions have no id of their own: the page cursor is the author id of
    /// the first reaction to return.
    async fn find_by_target(
        &self,
        target: ReactionTarget,
        query: PageQuery,
    ) -> RepoResult<Vec<ReactionEntry>>;
}

// ============================================================================
// Viewer Reaction Lookup
// ============================================================================

/// Out-of-band lookups of a viewer's own reactions
///
/// Used when the stored preview of a node does not contain the viewer's
/// reaction. `find_comment_reactions` is batched: one call covers any number
/// of comments or replies and returns zero or one entry per id.
#[async_trait]
pub trait ViewerReactionLookup: Send + Sync {
    /// The viewer's reaction on a post
    async fn find_post_reaction(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>>;

    /// The viewer's reactions on any of the given comments
    async fn find_comment_reactions(
        &self,
        comment_ids: &[Snowflake],
        viewer_id: Snowflake,
    ) -> RepoResult<Vec<ReactionEntry>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user's public summary by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Author>>;
}
