//! Domain to DTO mappers
//!
//! Tree mappers expect previews that were already capped by the aggregator;
//! they copy every list and total as-is.

use feed_core::{Author, CommentTree, PostMedia, PostTree, ReactionEntry, ReplyTree};

use super::responses::{
    AuthorResponse, CommentResponse, MediaResponse, PostResponse, ReactionResponse, ReplyResponse,
};

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username.clone(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            photo: author.photo.clone(),
        }
    }
}

impl From<&ReactionEntry> for ReactionResponse {
    fn from(entry: &ReactionEntry) -> Self {
        Self {
            reaction_type: entry.reaction.reaction_type,
            author: AuthorResponse::from(&entry.author),
            created_at: entry.reaction.created_at,
        }
    }
}

impl From<&PostMedia> for MediaResponse {
    fn from(media: &PostMedia) -> Self {
        Self {
            public_id: media.public_id.clone(),
            url: media.url.clone(),
        }
    }
}

fn reactions(entries: &[ReactionEntry]) -> Vec<ReactionResponse> {
    entries.iter().map(ReactionResponse::from).collect()
}

impl From<&ReplyTree> for ReplyResponse {
    fn from(reply: &ReplyTree) -> Self {
        Self {
            id: reply.comment.id.to_string(),
            parent_id: reply
                .comment
                .parent_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            author: AuthorResponse::from(&reply.author),
            content: reply.comment.content.clone(),
            created_at: reply.comment.created_at,
            reactions: reactions(&reply.reactions),
            total_reactions: reply.counts.reactions,
            total_replies: reply.counts.replies,
        }
    }
}

impl From<&CommentTree> for CommentResponse {
    fn from(comment: &CommentTree) -> Self {
        Self {
            id: comment.comment.id.to_string(),
            post_id: comment.comment.post_id.to_string(),
            author: AuthorResponse::from(&comment.author),
            content: comment.comment.content.clone(),
            created_at: comment.comment.created_at,
            reactions: reactions(&comment.reactions),
            replies: comment.replies.iter().map(ReplyResponse::from).collect(),
            total_reactions: comment.counts.reactions,
            total_replies: comment.counts.replies,
        }
    }
}

impl From<&PostTree> for PostResponse {
    fn from(tree: &PostTree) -> Self {
        Self {
            id: tree.post.id.to_string(),
            author: AuthorResponse::from(&tree.author),
            content: tree.post.content.clone(),
            visibility: tree.post.visibility,
            media: tree.post.media.iter().map(MediaResponse::from).collect(),
            created_at: tree.post.created_at,
            updated_at: tree.post.updated_at,
            reactions: reactions(&tree.reactions),
            comments: tree.comments.iter().map(CommentResponse::from).collect(),
            total_reactions: tree.counts.reactions,
            total_comments: tree.counts.comments,
        }
    }
}

impl From<PostTree> for PostResponse {
    fn from(tree: PostTree) -> Self {
        Self::from(&tree)
    }
}

impl From<CommentTree> for CommentResponse {
    fn from(comment: CommentTree) -> Self {
        Self::from(&comment)
    }
}
