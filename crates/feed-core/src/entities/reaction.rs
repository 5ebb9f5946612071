//! Reaction entity - a typed reaction on a post or a comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Kind of reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionType {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

impl ReactionType {
    /// Wire name, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Love => "LOVE",
            Self::Haha => "HAHA",
            Self::Wow => "WOW",
            Self::Sad => "SAD",
            Self::Angry => "ANGRY",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionTarget {
    Post(Snowflake),
    Comment(Snowflake),
}

impl ReactionTarget {
    /// Id of the post or comment
    #[inline]
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Post(id) | Self::Comment(id) => *id,
        }
    }
}

impl fmt::Display for ReactionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post(id) => write!(f, "post:{id}"),
            Self::Comment(id) => write!(f, "comment:{id}"),
        }
    }
}

/// Reaction entity
///
/// Unique per (author, target): reacting again replaces the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub target: ReactionTarget,
    pub author_id: Snowflake,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(target: ReactionTarget, author_id: Snowflake, reaction_type: ReactionType) -> Self {
        Self {
            target,
            author_id,
            reaction_type,
            created_at: Utc::now(),
        }
    }

    /// Check if this reaction was left by the given user
    #[inline]
    pub fn is_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}
