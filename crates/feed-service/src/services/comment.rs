//! Comment service
//!
//! Handles comments, replies (one level deep) and the paginated comment listing.

use feed_core::{Comment, DomainError, PageQuery, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CommentRequest, CommentResponse, Page, PostResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post, or reply to one of its top-level comments
    ///
    /// Returns the refreshed post so the new comment shows in its preview.
    #[instrument(skip(self, request))]
    pub async fn comment_on_post(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;
        let parent_id = request.parent_id()?;

        let posts = PostService::new(self.ctx);
        posts.require_visible_post(viewer_id, post_id).await?;

        let comment_id = self.ctx.generate_id();
        let comment = match parent_id {
            Some(parent_id) => {
                let parent = self
                    .ctx
                    .comment_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::CommentNotFound(parent_id))?;

                if parent.post_id != post_id {
                    return Err(DomainError::CommentNotOnPost {
                        comment_id: parent_id,
                        post_id,
                    }
                    .into());
                }
                if parent.is_reply() {
                    return Err(DomainError::NestedReplyNotAllowed.into());
                }

                Comment::new_reply(comment_id, post_id, parent_id, viewer_id, request.comment)
            }
            None => Comment::new(comment_id, post_id, viewer_id, request.comment),
        };

        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            post_id = %post_id,
            is_reply = comment.is_reply(),
            "Comment created"
        );

        posts.get_post(viewer_id, post_id).await
    }

    /// Top-level comments of a post, each with its reply and reaction previews
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Page<CommentResponse>> {
        PostService::new(self.ctx)
            .require_visible_post(viewer_id, post_id)
            .await?;

        let comments = self
            .ctx
            .comment_repo()
            .find_trees_by_post(post_id, viewer_id, query, self.ctx.preview_caps())
            .await?;

        let mut page = Page::from_overfetch(comments, query.limit, |c| c.comment.id);
        let comments = std::mem::take(&mut page.data);
        let comments = self
            .ctx
            .aggregator()
            .aggregate_comments(comments, viewer_id)
            .await?;

        Ok(page.with_data(comments))
    }
}
