//! # feed-core
//!
//! Domain layer containing entities, the post-tree read model, value objects,
//! repository traits, and the pure preview-ranking functions used when a post
//! is shown to a viewer.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod engagement;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use engagement::{merge_viewer_item, prioritize_user_item, PreviewCaps, Recency};
pub use entities::{
    Author, Comment, CommentCounts, CommentTree, Post, PostCounts, PostMedia, PostTree,
    PostVisibility, Reaction, ReactionEntry, ReactionTarget, ReactionType, ReplyCounts, ReplyTree,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, PageQuery, PostRepository, ReactionRepository, RepoResult, SortOrder,
    UserRepository, ViewerReactionLookup,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
