//! # feed-service
//!
//! Application layer: request/response DTOs, the engagement aggregator and
//! the post, comment and reaction services built on the repository traits
//! of `feed-core`.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, EngagementAggregator, PostService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
