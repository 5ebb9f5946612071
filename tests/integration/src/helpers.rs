//! Test helpers for integration tests
//!
//! - `ScriptedLookup`: a viewer-reaction lookup with canned answers that
//!   records every call and can be told to fail
//! - `InMemoryStore`: every repository trait over plain vectors, used to
//!   drive the services end to end
//! - `test_context`: a `ServiceContext` wired to one store

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use feed_common::FeedConfig;
use feed_core::{
    Author, Comment, CommentCounts, CommentRepository, CommentTree, DomainError, PageQuery, Post,
    PostCounts, PostRepository, PostTree, PreviewCaps, Reaction, ReactionEntry,
    ReactionRepository, ReactionTarget, ReplyCounts, ReplyTree, RepoResult, Snowflake,
    SnowflakeGenerator, SortOrder, UserRepository, ViewerReactionLookup,
};
use feed_service::ServiceContext;

// ============================================================================
// Scripted lookup
// ============================================================================

/// Viewer-reaction lookup with canned data and call recording
#[derive(Default)]
pub struct ScriptedLookup {
    reactions: Vec<ReactionEntry>,
    fail: AtomicBool,
    post_calls: AtomicUsize,
    batch_calls: Mutex<Vec<Vec<Snowflake>>>,
}

impl ScriptedLookup {
    /// Lookup that knows the given reactions (any target, any author)
    pub fn with_reactions(reactions: Vec<ReactionEntry>) -> Self {
        Self {
            reactions,
            ..Self::default()
        }
    }

    /// Make every following call fail with a database error
    pub fn fail_with_database_error(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    /// Id lists of every batched call, in call order
    pub fn batch_calls(&self) -> Vec<Vec<Snowflake>> {
        self.batch_calls.lock().unwrap().clone()
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ViewerReactionLookup for ScriptedLookup {
    async fn find_post_reaction(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .reactions
            .iter()
            .find(|r| r.reaction.target == ReactionTarget::Post(post_id) && r.author_id() == viewer_id)
            .cloned())
    }

    async fn find_comment_reactions(
        &self,
        comment_ids: &[Snowflake],
        viewer_id: Snowflake,
    ) -> RepoResult<Vec<ReactionEntry>> {
        self.batch_calls.lock().unwrap().push(comment_ids.to_vec());
        self.check()?;
        Ok(self
            .reactions
            .iter()
            .filter(|r| {
                matches!(r.reaction.target, ReactionTarget::Comment(id) if comment_ids.contains(&id))
                    && r.author_id() == viewer_id
            })
            .cloned()
            .collect())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct StoreState {
    users: Vec<Author>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    reactions: Vec<Reaction>,
}

/// All repositories over in-memory vectors
///
/// Tree loaders follow the read contract of the repository traits: previews
/// newest first, capped, with the viewer's latest authored comment or reply
/// appended when it fell outside the cap.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    next_user_id: AtomicI64,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a user and return its summary
    pub fn add_user(&self, username: &str) -> Author {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let author = Author::new(
            Snowflake::new(id),
            username.to_string(),
            username.to_uppercase(),
            "Tester".to_string(),
        );
        self.state.lock().unwrap().users.push(author.clone());
        author
    }

    /// Make every following write fail with a database error
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn reaction_count(&self) -> usize {
        self.state.lock().unwrap().reactions.len()
    }

    fn check_write(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("read-only replica".to_string()));
        }
        Ok(())
    }
}

impl StoreState {
    fn author(&self, id: Snowflake) -> Author {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .unwrap_or_else(|| Author::new(id, format!("ghost{id}"), String::new(), String::new()))
    }

    /// Reactions on a target, newest first
    fn reactions_on(&self, target: ReactionTarget) -> Vec<ReactionEntry> {
        let mut reactions: Vec<&Reaction> =
            self.reactions.iter().filter(|r| r.target == target).collect();
        reactions.sort_by_key(|r| Reverse((r.created_at, r.author_id)));
        reactions
            .into_iter()
            .map(|r| ReactionEntry::new(r.clone(), self.author(r.author_id)))
            .collect()
    }

    fn reaction_preview(&self, target: ReactionTarget, cap: usize) -> (Vec<ReactionEntry>, i64) {
        let mut all = self.reactions_on(target);
        let total = all.len() as i64;
        all.truncate(cap);
        (all, total)
    }

    /// Newest-first children of a post (`parent` None) or of a comment
    fn children(&self, post_id: Snowflake, parent: Option<Snowflake>) -> Vec<&Comment> {
        let mut children: Vec<&Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.parent_id == parent)
            .collect();
        children.sort_by_key(|c| Reverse((c.created_at, c.id)));
        children
    }

    fn reply_tree(&self, reply: &Comment, caps: PreviewCaps) -> ReplyTree {
        let (reactions, total_reactions) =
            self.reaction_preview(ReactionTarget::Comment(reply.id), caps.reactions);
        ReplyTree {
            comment: reply.clone(),
            author: self.author(reply.author_id),
            reactions,
            counts: ReplyCounts {
                reactions: total_reactions,
                replies: 0,
            },
        }
    }

    fn comment_tree(&self, comment: &Comment, viewer_id: Snowflake, caps: PreviewCaps) -> CommentTree {
        let all_replies = self.children(comment.post_id, Some(comment.id));
        let replies = preview_with_viewer(&all_replies, caps.replies, viewer_id)
            .into_iter()
            .map(|r| self.reply_tree(r, caps))
            .collect();
        let (reactions, total_reactions) =
            self.reaction_preview(ReactionTarget::Comment(comment.id), caps.reactions);

        CommentTree {
            comment: comment.clone(),
            author: self.author(comment.author_id),
            reactions,
            replies,
            counts: CommentCounts {
                reactions: total_reactions,
                replies: all_replies.len() as i64,
            },
        }
    }

    fn post_tree(&self, post: &Post, viewer_id: Snowflake, caps: PreviewCaps) -> PostTree {
        let all_comments = self.children(post.id, None);
        let comments = preview_with_viewer(&all_comments, caps.comments, viewer_id)
            .into_iter()
            .map(|c| self.comment_tree(c, viewer_id, caps))
            .collect();
        let (reactions, total_reactions) =
            self.reaction_preview(ReactionTarget::Post(post.id), caps.reactions);

        PostTree {
            post: post.clone(),
            author: self.author(post.author_id),
            reactions,
            comments,
            counts: PostCounts {
                reactions: total_reactions,
                comments: all_comments.len() as i64,
            },
        }
    }
}

/// First `cap` items plus the viewer's newest one when it is not among them
fn preview_with_viewer<'a>(all: &[&'a Comment], cap: usize, viewer_id: Snowflake) -> Vec<&'a Comment> {
    let mut preview: Vec<&Comment> = all.iter().take(cap).copied().collect();
    if !preview.iter().any(|c| c.author_id == viewer_id) {
        if let Some(own) = all.iter().find(|c| c.author_id == viewer_id) {
            preview.push(*own);
        }
    }
    preview
}

/// Apply cursor, order and `limit + 1` to rows sorted oldest first
fn paginate<T>(mut rows: Vec<T>, query: PageQuery, key: impl Fn(&T) -> Snowflake) -> Vec<T> {
    if query.order == SortOrder::Desc {
        rows.reverse();
    }
    let start = query
        .cursor
        .and_then(|cursor| rows.iter().position(|row| key(row) == cursor))
        .unwrap_or(0);
    rows.into_iter()
        .skip(start)
        .take(query.fetch_limit() as usize)
        .collect()
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.state.lock().unwrap().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_tree(
        &self,
        id: Snowflake,
        viewer_id: Snowflake,
        caps: PreviewCaps,
    ) -> RepoResult<Option<PostTree>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.post_tree(p, viewer_id, caps)))
    }

    async fn find_trees(
        &self,
        viewer_id: Snowflake,
        author_id: Option<Snowflake>,
        query: PageQuery,
        caps: PreviewCaps,
    ) -> RepoResult<Vec<PostTree>> {
        let state = self.state.lock().unwrap();
        let mut posts: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| p.is_visible_to(viewer_id))
            .filter(|p| author_id.map_or(true, |author| p.author_id == author))
            .collect();
        posts.sort_by_key(|p| p.id);

        Ok(paginate(posts, query, |p| p.id)
            .into_iter()
            .map(|p| state.post_tree(p, viewer_id, caps))
            .collect())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.check_write()?;
        self.state.lock().unwrap().posts.push(post.clone());
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().unwrap().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.check_write()?;
        self.state.lock().unwrap().comments.push(comment.clone());
        Ok(())
    }

    async fn find_trees_by_post(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
        query: PageQuery,
        caps: PreviewCaps,
    ) -> RepoResult<Vec<CommentTree>> {
        let state = self.state.lock().unwrap();
        let mut comments = state.children(post_id, None);
        comments.sort_by_key(|c| c.id);

        Ok(paginate(comments, query, |c| c.id)
            .into_iter()
            .map(|c| state.comment_tree(c, viewer_id, caps))
            .collect())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        self.check_write()?;
        let mut state = self.state.lock().unwrap();
        // an existing row only changes type and keeps its original timestamp
        match state
            .reactions
            .iter_mut()
            .find(|r| r.target == reaction.target && r.author_id == reaction.author_id)
        {
            Some(existing) => existing.reaction_type = reaction.reaction_type,
            None => state.reactions.push(reaction.clone()),
        }
        Ok(())
    }

    async fn delete(&self, target: ReactionTarget, author_id: Snowflake) -> RepoResult<()> {
        self.check_write()?;
        self.state
            .lock()
            .unwrap()
            .reactions
            .retain(|r| !(r.target == target && r.author_id == author_id));
        Ok(())
    }

    async fn find_by_target(
        &self,
        target: ReactionTarget,
        query: PageQuery,
    ) -> RepoResult<Vec<ReactionEntry>> {
        let state = self.state.lock().unwrap();
        let mut entries = state.reactions_on(target);
        // oldest first, as `paginate` expects
        entries.reverse();
        Ok(paginate(entries, query, ReactionEntry::author_id))
    }
}

#[async_trait]
impl ViewerReactionLookup for InMemoryStore {
    async fn find_post_reaction(
        &self,
        post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reactions_on(ReactionTarget::Post(post_id))
            .into_iter()
            .find(|r| r.author_id() == viewer_id))
    }

    async fn find_comment_reactions(
        &self,
        comment_ids: &[Snowflake],
        viewer_id: Snowflake,
    ) -> RepoResult<Vec<ReactionEntry>> {
        let state = self.state.lock().unwrap();
        let by_target: HashMap<Snowflake, ReactionEntry> = state
            .reactions
            .iter()
            .filter(|r| r.author_id == viewer_id)
            .filter_map(|r| match r.target {
                ReactionTarget::Comment(id) if comment_ids.contains(&id) => {
                    Some((id, ReactionEntry::new(r.clone(), state.author(r.author_id))))
                }
                _ => None,
            })
            .collect();
        Ok(by_target.into_values().collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Author>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

// ============================================================================
// Context
// ============================================================================

/// Service context backed entirely by `store`
pub fn test_context(store: &Arc<InMemoryStore>) -> ServiceContext {
    test_context_with(store, FeedConfig::default())
}

/// Like [`test_context`] with custom caps and page sizes
pub fn test_context_with(store: &Arc<InMemoryStore>, feed: FeedConfig) -> ServiceContext {
    ServiceContext::builder()
        .post_repo(store.clone())
        .comment_repo(store.clone())
        .reaction_repo(store.clone())
        .user_repo(store.clone())
        .viewer_lookup(store.clone())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .feed_config(feed)
        .build()
        .unwrap()
}
