//! Post service
//!
//! Handles post creation and the viewer-facing post reads (single post,
//! feed, a user's timeline).

use feed_core::{DomainError, PageQuery, Post, PostTree, Snowflake};
use futures::future::try_join_all;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, Page, PostResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new post and return it as its author sees it
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.content,
            request.visibility,
            request.media.into_iter().map(Into::into).collect(),
        );
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        let tree = self
            .ctx
            .post_repo()
            .find_tree(post.id, author_id, self.ctx.preview_caps())
            .await?
            .ok_or_else(|| {
                DomainError::InternalError(format!("post {} missing after create", post.id))
            })?;

        self.ctx.aggregator().aggregate(tree, author_id).await
    }

    /// Get one post
    ///
    /// A private post of another user is reported as not found.
    #[instrument(skip(self))]
    pub async fn get_post(&self, viewer_id: Snowflake, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let tree = self.load_visible_tree(viewer_id, post_id).await?;
        self.ctx.aggregator().aggregate(tree, viewer_id).await
    }

    /// Posts visible to the viewer, newest first by default
    #[instrument(skip(self))]
    pub async fn list_feed(
        &self,
        viewer_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Page<PostResponse>> {
        let trees = self
            .ctx
            .post_repo()
            .find_trees(viewer_id, None, query, self.ctx.preview_caps())
            .await?;

        self.aggregate_page(trees, query, viewer_id).await
    }

    /// Posts of one user that are visible to the viewer
    #[instrument(skip(self))]
    pub async fn list_by_username(
        &self,
        viewer_id: Snowflake,
        username: &str,
        query: PageQuery,
    ) -> ServiceResult<Page<PostResponse>> {
        let author = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        let trees = self
            .ctx
            .post_repo()
            .find_trees(viewer_id, Some(author.id), query, self.ctx.preview_caps())
            .await?;

        self.aggregate_page(trees, query, viewer_id).await
    }

    /// Fetch a post the viewer is allowed to see
    pub(crate) async fn require_visible_post(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .filter(|post| post.is_visible_to(viewer_id))
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    /// Load a post tree the viewer is allowed to see
    pub(crate) async fn load_visible_tree(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<PostTree> {
        self.ctx
            .post_repo()
            .find_tree(post_id, viewer_id, self.ctx.preview_caps())
            .await?
            .filter(|tree| tree.post.is_visible_to(viewer_id))
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn aggregate_page(
        &self,
        trees: Vec<PostTree>,
        query: PageQuery,
        viewer_id: Snowflake,
    ) -> ServiceResult<Page<PostResponse>> {
        let mut page = Page::from_overfetch(trees, query.limit, |tree| tree.post.id);
        let trees = std::mem::take(&mut page.data);
        let aggregator = self.ctx.aggregator();

        let posts =
            try_join_all(trees.into_iter().map(|tree| aggregator.aggregate(tree, viewer_id))).await?;
        Ok(page.with_data(posts))
    }
}
