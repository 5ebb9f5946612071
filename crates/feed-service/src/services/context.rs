//! Service context - dependency container for services

use std::sync::Arc;

use feed_common::FeedConfig;
use feed_core::{
    CommentRepository, PostRepository, PreviewCaps, ReactionRepository, Snowflake,
    SnowflakeGenerator, UserRepository, ViewerReactionLookup,
};

use super::aggregator::EngagementAggregator;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    user_repo: Arc<dyn UserRepository>,

    // Supplemental lookups used by the aggregator
    viewer_lookup: Arc<dyn ViewerReactionLookup>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    feed: FeedConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn viewer_lookup(&self) -> &dyn ViewerReactionLookup {
        self.viewer_lookup.as_ref()
    }

    // === Settings ===

    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed
    }

    pub fn preview_caps(&self) -> PreviewCaps {
        self.feed.preview_caps()
    }

    /// Aggregator bound to this context's lookups and caps
    pub fn aggregator(&self) -> EngagementAggregator<'_> {
        EngagementAggregator::new(self.viewer_lookup(), self.preview_caps())
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("feed", &self.feed)
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    viewer_lookup: Option<Arc<dyn ViewerReactionLookup>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    feed: Option<FeedConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn viewer_lookup(mut self, lookup: Arc<dyn ViewerReactionLookup>) -> Self {
        self.viewer_lookup = Some(lookup);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Preview caps and page sizes (defaults when not set)
    pub fn feed_config(mut self, feed: FeedConfig) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            viewer_lookup: self
                .viewer_lookup
                .ok_or_else(|| ServiceError::validation("viewer_lookup is required"))?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            feed: self.feed.unwrap_or_default(),
        })
    }
}
