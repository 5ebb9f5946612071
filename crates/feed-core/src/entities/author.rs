//! Author summary - the public slice of a user attached to posts, comments and reactions

use crate::value_objects::Snowflake;

/// Public profile fields shown next to authored content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Snowflake,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
}

impl Author {
    /// Create an author summary without a photo
    pub fn new(id: Snowflake, username: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            photo: None,
        }
    }

    /// "First Last", trimmed when either part is empty
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
