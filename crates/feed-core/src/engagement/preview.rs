//! Capped preview lists with viewer prioritisation
//!
//! A preview is a short, recency-ordered (newest first) slice of a larger
//! collection: the latest reactions on a post, the latest comments, the
//! latest replies under a comment. When the viewer has contributed an item to
//! that collection, the item must be shown even if it is older than the
//! cap-th newest one; the least recent other item makes room for it.
//!
//! Everything here is pure and synchronous. Fetching the viewer's item when
//! the stored preview does not contain it is the caller's job.

use chrono::{DateTime, Utc};

/// Anything that can be ordered by creation time
pub trait Recency {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Display caps for each preview list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewCaps {
    /// Reactions shown on posts, comments and replies
    pub reactions: usize,
    /// Top-level comments shown on a post
    pub comments: usize,
    /// Replies shown under a comment
    pub replies: usize,
}

impl PreviewCaps {
    pub const DEFAULT_REACTIONS: usize = 5;
    pub const DEFAULT_COMMENTS: usize = 3;
    pub const DEFAULT_REPLIES: usize = 3;

    pub fn new(reactions: usize, comments: usize, replies: usize) -> Self {
        Self {
            reactions,
            comments,
            replies,
        }
    }
}

impl Default for PreviewCaps {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_REACTIONS,
            Self::DEFAULT_COMMENTS,
            Self::DEFAULT_REPLIES,
        )
    }
}

/// Build the working set for a preview
///
/// `fetched` is the viewer's item obtained out of band. It is appended only
/// when no item of `preview` already belongs to the viewer, so the working set
/// never holds two viewer items and grows by at most one.
pub fn merge_viewer_item<T, F>(mut preview: Vec<T>, fetched: Option<T>, is_viewer: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    if let Some(item) = fetched {
        if !preview.iter().any(|existing| is_viewer(existing)) {
            preview.push(item);
        }
    }
    preview
}

/// Cap a recency-ordered working set while keeping the viewer's item
///
/// Without a viewer item this is `take(cap)` and the input order is kept
/// untouched. With one, the result is the viewer item plus the first
/// `cap - 1` other items in their input order, re-sorted newest first.
/// The sort is stable: items with equal timestamps keep their relative
/// order, with the viewer item ahead of the others.
pub fn prioritize_user_item<T, F>(items: Vec<T>, cap: usize, is_viewer: F) -> Vec<T>
where
    T: Recency,
    F: Fn(&T) -> bool,
{
    if items.is_empty() || cap == 0 {
        return Vec::new();
    }

    let Some(position) = items.iter().position(|item| is_viewer(item)) else {
        let mut items = items;
        items.truncate(cap);
        return items;
    };

    let mut others = items;
    let viewer_item = others.remove(position);
    others.truncate(cap - 1);

    let mut result = Vec::with_capacity(others.len() + 1);
    result.push(viewer_item);
    result.extend(others);
    result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    result
}
