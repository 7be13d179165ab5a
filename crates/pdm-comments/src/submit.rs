//! Validation of comments before they are inserted.

use pdm_conf::CommentLimits;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::record::ANONYMOUS;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please enter a comment")]
    EmptyContent,
    #[error("Comment is {len} characters long, the limit is {max}")]
    ContentTooLong { len: usize, max: usize },
    #[error("Name is {len} characters long, the limit is {max}")]
    AuthorTooLong { len: usize, max: usize },
}

/// The insert payload for the `comments` table, and the body posted to the
/// notification hook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl NewComment {
    /// Trim and check user input.
    ///
    /// A blank name posts as [`ANONYMOUS`]. Lengths are counted in characters
    /// after trimming.
    pub fn new(
        author_name: &str,
        content: &str,
        parent_id: Option<String>,
        limits: &CommentLimits,
    ) -> Result<Self, SubmissionError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SubmissionError::EmptyContent);
        }

        let len = content.chars().count();
        if len > limits.max_content_chars {
            return Err(SubmissionError::ContentTooLong {
                len,
                max: limits.max_content_chars,
            });
        }

        let author_name = author_name.trim();
        let len = author_name.chars().count();
        if len > limits.max_author_chars {
            return Err(SubmissionError::AuthorTooLong {
                len,
                max: limits.max_author_chars,
            });
        }

        Ok(Self {
            author_name: if author_name.is_empty() {
                ANONYMOUS.to_string()
            } else {
                author_name.to_string()
            },
            content: content.to_string(),
            parent_id: parent_id.filter(|id| !id.is_empty()),
        })
    }

    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
