use serde::Deserialize;
use serde::Serialize;

use crate::lexer::BLOCK_DELIMITER;
use crate::lexer::INLINE_DELIMITER;

/// One contiguous piece of a tokenized text.
///
/// Serializes as `{"kind": "text", "value": ..}`,
/// `{"kind": "inlineMath", "expression": ..}` or
/// `{"kind": "blockMath", "expression": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MathSegment {
    Text { value: String },
    InlineMath { expression: String },
    BlockMath { expression: String },
}

impl MathSegment {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn inline(expression: impl Into<String>) -> Self {
        Self::InlineMath {
            expression: expression.into(),
        }
    }

    #[must_use]
    pub fn block(expression: impl Into<String>) -> Self {
        Self::BlockMath {
            expression: expression.into(),
        }
    }

    #[must_use]
    pub fn is_math(&self) -> bool {
        matches!(self, Self::InlineMath { .. } | Self::BlockMath { .. })
    }

    /// The segment body with delimiters stripped.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text { value } => value,
            Self::InlineMath { expression } | Self::BlockMath { expression } => expression,
        }
    }

    /// The segment as it appeared in the source, delimiters included.
    #[must_use]
    pub fn to_source(&self) -> String {
        match self {
            Self::Text { value } => value.clone(),
            Self::InlineMath { expression } => {
                let delimiter = char::from(INLINE_DELIMITER);
                format!("{delimiter}{expression}{delimiter}")
            }
            Self::BlockMath { expression } => {
                format!("{BLOCK_DELIMITER}{expression}{BLOCK_DELIMITER}")
            }
        }
    }

    /// Byte length of the segment in the source.
    #[must_use]
    pub fn source_len(&self) -> usize {
        match self {
            Self::Text { value } => value.len(),
            Self::InlineMath { expression } => expression.len() + 2,
            Self::BlockMath { expression } => expression.len() + 2 * BLOCK_DELIMITER.len(),
        }
    }
}
