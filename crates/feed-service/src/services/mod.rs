//! Application services
//!
//! Services borrow a [`ServiceContext`] and orchestrate repository calls,
//! validation and aggregation for one use case each.

pub mod aggregator;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;

pub use aggregator::EngagementAggregator;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::ReactionService;
