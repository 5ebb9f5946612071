//! Post-tree read model
//!
//! The shape the persistence layer hands to the application layer when a post
//! is displayed: post -> top-level comments -> replies, each level carrying a
//! recency-ordered preview of its reactions and the precomputed totals of the
//! full underlying sets.
//!
//! Preview lists are candidates, not final output. They are ordered by
//! `created_at` descending and may hold one more item than the display cap
//! when the loader appended the viewer's own comment or reply.

use chrono::{DateTime, Utc};

use crate::engagement::Recency;
use crate::value_objects::Snowflake;

use super::{Author, Comment, Post, Reaction};

/// A reaction together with its author's summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    pub reaction: Reaction,
    pub author: Author,
}

impl ReactionEntry {
    pub fn new(reaction: Reaction, author: Author) -> Self {
        Self { reaction, author }
    }

    #[inline]
    pub fn author_id(&self) -> Snowflake {
        self.author.id
    }
}

/// Totals for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostCounts {
    pub reactions: i64,
    /// Top-level comments only
    pub comments: i64,
}

/// Totals for a top-level comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentCounts {
    pub reactions: i64,
    pub replies: i64,
}

/// Totals for a reply (`replies` is always zero while nesting stops at one level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyCounts {
    pub reactions: i64,
    pub replies: i64,
}

/// A reply as loaded for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTree {
    pub comment: Comment,
    pub author: Author,
    pub reactions: Vec<ReactionEntry>,
    pub counts: ReplyCounts,
}

/// A top-level comment as loaded for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTree {
    pub comment: Comment,
    pub author: Author,
    pub reactions: Vec<ReactionEntry>,
    pub replies: Vec<ReplyTree>,
    pub counts: CommentCounts,
}

/// A post as loaded for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTree {
    pub post: Post,
    pub author: Author,
    pub reactions: Vec<ReactionEntry>,
    pub comments: Vec<CommentTree>,
    pub counts: PostCounts,
}

impl Recency for ReactionEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.reaction.created_at
    }
}

impl Recency for CommentTree {
    fn created_at(&self) -> DateTime<Utc> {
        self.comment.created_at
    }
}

impl Recency for ReplyTree {
    fn created_at(&self) -> DateTime<Utc> {
        self.comment.created_at
    }
}
