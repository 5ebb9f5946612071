//! Reaction service
//!
//! Handles reactions on posts and comments (set, change, remove, list).

use feed_core::{DomainError, PageQuery, Reaction, ReactionTarget, Snowflake};
use tracing::{info, instrument};

use crate::dto::{Page, PostResponse, ReactionRequest, ReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a post; a request without a type removes the reaction
    #[instrument(skip(self, request))]
    pub async fn react_to_post(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        request: ReactionRequest,
    ) -> ServiceResult<PostResponse> {
        let posts = PostService::new(self.ctx);
        posts.require_visible_post(viewer_id, post_id).await?;

        self.apply(ReactionTarget::Post(post_id), viewer_id, request).await?;

        posts.get_post(viewer_id, post_id).await
    }

    /// React to a comment or reply of a post
    #[instrument(skip(self, request))]
    pub async fn react_to_comment(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        comment_id: Snowflake,
        request: ReactionRequest,
    ) -> ServiceResult<PostResponse> {
        let posts = PostService::new(self.ctx);
        posts.require_visible_post(viewer_id, post_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if comment.post_id != post_id {
            return Err(DomainError::CommentNotOnPost {
                comment_id,
                post_id,
            }
            .into());
        }

        self.apply(ReactionTarget::Comment(comment_id), viewer_id, request)
            .await?;

        posts.get_post(viewer_id, post_id).await
    }

    /// All reactions on a post
    #[instrument(skip(self))]
    pub async fn list_post_reactions(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Page<ReactionResponse>> {
        PostService::new(self.ctx)
            .require_visible_post(viewer_id, post_id)
            .await?;

        self.list(ReactionTarget::Post(post_id), query).await
    }

    /// All reactions on a comment or reply
    #[instrument(skip(self))]
    pub async fn list_comment_reactions(
        &self,
        viewer_id: Snowflake,
        comment_id: Snowflake,
        query: PageQuery,
    ) -> ServiceResult<Page<ReactionResponse>> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        PostService::new(self.ctx)
            .require_visible_post(viewer_id, comment.post_id)
            .await?;

        self.list(ReactionTarget::Comment(comment_id), query).await
    }

    async fn apply(
        &self,
        target: ReactionTarget,
        viewer_id: Snowflake,
        request: ReactionRequest,
    ) -> ServiceResult<()> {
        match request.reaction_type {
            Some(reaction_type) => {
                let reaction = Reaction::new(target, viewer_id, reaction_type);
                self.ctx.reaction_repo().upsert(&reaction).await?;
                info!(
                    reaction_target = %target,
                    user_id = %viewer_id,
                    reaction = %reaction_type,
                    "Reaction set"
                );
            }
            None => {
                self.ctx.reaction_repo().delete(target, viewer_id).await?;
                info!(reaction_target = %target, user_id = %viewer_id, "Reaction removed");
            }
        }
        Ok(())
    }

    async fn list(
        &self,
        target: ReactionTarget,
        query: PageQuery,
    ) -> ServiceResult<Page<ReactionResponse>> {
        let entries = self.ctx.reaction_repo().find_by_target(target, query).await?;

        let mut page = Page::from_overfetch(entries, query.limit, |e| e.author_id());
        let entries = std::mem::take(&mut page.data);
        Ok(page.with_data(entries.iter().map(ReactionResponse::from).collect()))
    }
}
