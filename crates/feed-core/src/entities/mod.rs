//! Domain entities - posts, comments, reactions and the post-tree read model

mod author;
mod comment;
mod post;
mod reaction;
mod tree;

pub use author::Author;
pub use comment::Comment;
pub use post::{Post, PostMedia, PostVisibility};
pub use reaction::{Reaction, ReactionTarget, ReactionType};
pub use tree::{
    CommentCounts, CommentTree, PostCounts, PostTree, ReactionEntry, ReplyCounts, ReplyTree,
};
