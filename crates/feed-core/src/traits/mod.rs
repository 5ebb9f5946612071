//! Repository traits

mod repositories;

pub use repositories::{
    CommentRepository, PageQuery, PostRepository, ReactionRepository, RepoResult, SortOrder,
    UserRepository, ViewerReactionLookup,
};
