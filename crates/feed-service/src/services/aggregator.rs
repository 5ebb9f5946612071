//! Engagement aggregator
//!
//! Turns a loaded post tree into what a given viewer sees: every preview list
//! (post reactions, comments, comment reactions, replies, reply reactions) is
//! capped, and whenever the viewer has contributed to a list their item is
//! kept in it.
//!
//! Viewer-authored comments and replies arrive in the tree itself (the loader
//! appends them past the cap). Viewer reactions that fell outside a stored
//! preview are fetched here with at most three lookups per post: one point
//! lookup for the post, one batched lookup for all comments, one batched
//! lookup for all replies. The lookups run concurrently and the first failure
//! aborts the aggregation.

use std::collections::HashMap;

use feed_core::{
    merge_viewer_item, prioritize_user_item, CommentTree, PostTree, PreviewCaps, ReactionEntry,
    ReplyTree, RepoResult, Snowflake, ViewerReactionLookup,
};
use tracing::{debug, instrument};

use crate::dto::{CommentResponse, PostResponse};

use super::error::ServiceResult;

/// Viewer reactions keyed by the comment or reply they target
type ReactionsByTarget = HashMap<Snowflake, ReactionEntry>;

/// Shapes post trees for a viewer
#[derive(Clone, Copy)]
pub struct EngagementAggregator<'a> {
    lookup: &'a dyn ViewerReactionLookup,
    caps: PreviewCaps,
}

impl<'a> EngagementAggregator<'a> {
    pub fn new(lookup: &'a dyn ViewerReactionLookup, caps: PreviewCaps) -> Self {
        Self { lookup, caps }
    }

    /// Aggregate one post as seen by `viewer`
    ///
    /// # Errors
    /// Propagates the first failing lookup; no partial result is returned.
    #[instrument(skip(self, tree), fields(post_id = %tree.post.id, viewer_id = %viewer))]
    pub async fn aggregate(&self, tree: PostTree, viewer: Snowflake) -> ServiceResult<PostResponse> {
        let PostTree {
            post,
            author,
            reactions,
            comments,
            counts,
        } = tree;

        let is_viewer_comment = |c: &CommentTree| c.comment.author_id == viewer;
        let comments: Vec<CommentTree> =
            prioritize_user_item(comments, self.caps.comments, is_viewer_comment)
                .into_iter()
                .map(|comment| self.cap_replies(comment, viewer))
                .collect();

        let post_needs_lookup = !contains_viewer(&reactions, viewer);
        let (comment_ids, reply_ids) = missing_viewer_reactions(&comments, viewer);

        let post_id = post.id;
        let lookup = self.lookup;
        let post_lookup = async move {
            if post_needs_lookup {
                lookup.find_post_reaction(post_id, viewer).await
            } else {
                Ok(None)
            }
        };
        let (post_reaction, mut comment_reactions, mut reply_reactions) = tokio::try_join!(
            post_lookup,
            self.find_batched(&comment_ids, viewer),
            self.find_batched(&reply_ids, viewer),
        )?;

        debug!(
            post_lookup = post_needs_lookup,
            comment_lookups = comment_ids.len(),
            reply_lookups = reply_ids.len(),
            "Viewer reactions resolved"
        );

        let tree = PostTree {
            reactions: self.reaction_preview(reactions, post_reaction, viewer),
            comments: comments
                .into_iter()
                .map(|comment| {
                    self.finish_comment(comment, &mut comment_reactions, &mut reply_reactions, viewer)
                })
                .collect(),
            post,
            author,
            counts,
        };

        Ok(PostResponse::from(&tree))
    }

    /// Aggregate a page of top-level comments as seen by `viewer`
    ///
    /// The page itself is not capped; replies and reactions are.
    #[instrument(skip(self, comments), fields(count = comments.len(), viewer_id = %viewer))]
    pub async fn aggregate_comments(
        &self,
        comments: Vec<CommentTree>,
        viewer: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let comments: Vec<CommentTree> = comments
            .into_iter()
            .map(|comment| self.cap_replies(comment, viewer))
            .collect();

        let (comment_ids, reply_ids) = missing_viewer_reactions(&comments, viewer);
        let (mut comment_reactions, mut reply_reactions) = tokio::try_join!(
            self.find_batched(&comment_ids, viewer),
            self.find_batched(&reply_ids, viewer),
        )?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let comment =
                    self.finish_comment(comment, &mut comment_reactions, &mut reply_reactions, viewer);
                CommentResponse::from(&comment)
            })
            .collect())
    }

    /// One batched lookup, skipped entirely when there is nothing to look up
    async fn find_batched(
        &self,
        ids: &[Snowflake],
        viewer: Snowflake,
    ) -> RepoResult<ReactionsByTarget> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let entries = self.lookup.find_comment_reactions(ids, viewer).await?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.reaction.target.id(), entry))
            .collect())
    }

    fn cap_replies(&self, mut comment: CommentTree, viewer: Snowflake) -> CommentTree {
        let replies = std::mem::take(&mut comment.replies);
        comment.replies = prioritize_user_item(replies, self.caps.replies, |r: &ReplyTree| {
            r.comment.author_id == viewer
        });
        comment
    }

    fn reaction_preview(
        &self,
        preview: Vec<ReactionEntry>,
        fetched: Option<ReactionEntry>,
        viewer: Snowflake,
    ) -> Vec<ReactionEntry> {
        let is_viewer = |r: &ReactionEntry| r.author_id() == viewer;
        prioritize_user_item(
            merge_viewer_item(preview, fetched, is_viewer),
            self.caps.reactions,
            is_viewer,
        )
    }

    fn finish_comment(
        &self,
        mut comment: CommentTree,
        comment_reactions: &mut ReactionsByTarget,
        reply_reactions: &mut ReactionsByTarget,
        viewer: Snowflake,
    ) -> CommentTree {
        let fetched = comment_reactions.remove(&comment.comment.id);
        comment.reactions = self.reaction_preview(std::mem::take(&mut comment.reactions), fetched, viewer);

        for reply in &mut comment.replies {
            let fetched = reply_reactions.remove(&reply.comment.id);
            reply.reactions = self.reaction_preview(std::mem::take(&mut reply.reactions), fetched, viewer);
        }
        comment
    }
}

fn contains_viewer(reactions: &[ReactionEntry], viewer: Snowflake) -> bool {
    reactions.iter().any(|r| r.author_id() == viewer)
}

/// Ids of comments and replies whose preview lacks the viewer's reaction
fn missing_viewer_reactions(
    comments: &[CommentTree],
    viewer: Snowflake,
) -> (Vec<Snowflake>, Vec<Snowflake>) {
    let comment_ids = comments
        .iter()
        .filter(|c| !contains_viewer(&c.reactions, viewer))
        .map(|c| c.comment.id)
        .collect();
    let reply_ids = comments
        .iter()
        .flat_map(|c| c.replies.iter())
        .filter(|r| !contains_viewer(&r.reactions, viewer))
        .map(|r| r.comment.id)
        .collect();
    (comment_ids, reply_ids)
}
