//! Test fixtures and data generators
//!
//! Tree builders take minutes relative to a fixed instant so previews have a
//! deterministic recency order.

use chrono::{DateTime, Duration, TimeZone, Utc};
use feed_core::{
    Author, Comment, CommentCounts, CommentTree, Post, PostCounts, PostTree, PostVisibility,
    Reaction, ReactionEntry, ReactionTarget, ReactionType, ReplyCounts, ReplyTree, Snowflake,
};

/// Post id used by the tree builders
pub const POST_ID: Snowflake = Snowflake::new(1_000);

/// A fixed instant plus `minute` minutes
pub fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::minutes(minute)
}

pub fn author(id: i64) -> Author {
    Author::new(
        Snowflake::new(id),
        format!("user{id}"),
        format!("First{id}"),
        format!("Last{id}"),
    )
}

/// Reaction by `author_id` on `target`, created at `minute`
pub fn reaction(target: ReactionTarget, author_id: i64, minute: i64) -> ReactionEntry {
    let mut reaction = Reaction::new(target, Snowflake::new(author_id), ReactionType::Like);
    reaction.created_at = at(minute);
    ReactionEntry::new(reaction, author(author_id))
}

pub fn post_reaction(author_id: i64, minute: i64) -> ReactionEntry {
    reaction(ReactionTarget::Post(POST_ID), author_id, minute)
}

pub fn comment_reaction(comment_id: i64, author_id: i64, minute: i64) -> ReactionEntry {
    reaction(ReactionTarget::Comment(Snowflake::new(comment_id)), author_id, minute)
}

pub fn reply(id: i64, parent_id: i64, author_id: i64, minute: i64) -> ReplyTree {
    let mut comment = Comment::new_reply(
        Snowflake::new(id),
        POST_ID,
        Snowflake::new(parent_id),
        Snowflake::new(author_id),
        format!("reply {id}"),
    );
    comment.created_at = at(minute);
    ReplyTree {
        comment,
        author: author(author_id),
        reactions: Vec::new(),
        counts: ReplyCounts::default(),
    }
}

pub fn comment(id: i64, author_id: i64, minute: i64) -> CommentTree {
    let mut comment = Comment::new(
        Snowflake::new(id),
        POST_ID,
        Snowflake::new(author_id),
        format!("comment {id}"),
    );
    comment.created_at = at(minute);
    CommentTree {
        comment,
        author: author(author_id),
        reactions: Vec::new(),
        replies: Vec::new(),
        counts: CommentCounts::default(),
    }
}

/// Public post by user 1 with no engagement
pub fn post_tree() -> PostTree {
    let mut post = Post::new(
        POST_ID,
        Snowflake::new(1),
        "hello".to_string(),
        PostVisibility::Public,
        Vec::new(),
    );
    post.created_at = at(0);
    post.updated_at = at(0);
    PostTree {
        post,
        author: author(1),
        reactions: Vec::new(),
        comments: Vec::new(),
        counts: PostCounts::default(),
    }
}

/// Author ids of a preview, in order
pub fn authors_of(entries: &[feed_service::dto::ReactionResponse]) -> Vec<String> {
    entries.iter().map(|r| r.author.id.clone()).collect()
}
