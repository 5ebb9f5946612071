//! Data transfer objects for requests and responses
//!
//! - Request DTOs with validation
//! - Response DTOs for serialized output
//! - Mappers from the domain read model to response DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CommentRequest, CreatePostRequest, MediaRequest, PageParams, ReactionRequest};
pub use responses::{
    AuthorResponse, CommentResponse, MediaResponse, Page, PageMeta, PostResponse,
    ReactionResponse, ReplyResponse,
};
