use chrono::DateTime;
use chrono::Utc;
use pdm_math::MathSegment;
use serde::Deserialize;
use serde::Serialize;

use crate::display::parse_timestamp;
use crate::reactions::ReactionSummary;

/// Display name for comments posted without one.
pub const ANONYMOUS: &str = "Anonymous";

/// A comment row as returned by the backend.
///
/// Columns the widget does not use (`is_visible`, ...) are ignored on
/// deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Flat `upvotes`/`downvotes`/`my_reaction` columns, present only when
    /// the backend view joins them in.
    #[serde(flatten)]
    pub reactions: Option<ReactionSummary>,
}

impl CommentRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author_name: String::new(),
            content: String::new(),
            created_at: created_at.into(),
            parent_id: None,
            reactions: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = author_name.into();
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// The parent id, treating an empty string as no parent.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn display_author(&self) -> &str {
        let name = self.author_name.trim();
        if name.is_empty() {
            ANONYMOUS
        } else {
            name
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// The body split into text and math for rendering.
    #[must_use]
    pub fn body_segments(&self) -> Vec<MathSegment> {
        pdm_math::tokenize(&self.content)
    }
}
