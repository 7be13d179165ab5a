//! Math-span tokenizing for comment bodies.
//!
//! Comment text may carry LaTeX in two forms:
//! - block math, delimited by `$$ ... $$`, rendered as a standalone equation
//! - inline math, delimited by `$ ... $`, rendered within the line
//!
//! ## Architecture
//!
//! Tokenizing is a two-tier scan:
//!
//! 1. **Block pass**: the whole text is scanned for non-overlapping `$$` spans
//! 2. **Inline pass**: every plain-text gap around the block spans is scanned
//!    for `$` spans whose body contains no `$`
//!
//! The result is a flat list of [`MathSegment`]s in document order that covers
//! the input exactly: [`render_source`] puts the delimiters back and yields the
//! original string.
//!
//! ## Example
//!
//! ```
//! use pdm_math::{tokenize, MathSegment};
//!
//! let segments = tokenize("Cost is $x^2$ total.");
//! assert_eq!(
//!     segments,
//!     vec![
//!         MathSegment::text("Cost is "),
//!         MathSegment::inline("x^2"),
//!         MathSegment::text(" total."),
//!     ]
//! );
//! ```

mod lexer;
mod segments;

pub use lexer::MathLexer;
pub use segments::MathSegment;

/// Split `text` into plain-text and math segments.
///
/// Never fails: unterminated or stray delimiters are kept as plain text.
#[must_use]
pub fn tokenize(text: &str) -> Vec<MathSegment> {
    MathLexer::new(text).tokenize()
}

/// Rebuild the source text of a segment list, delimiters included.
#[must_use]
pub fn render_source(segments: &[MathSegment]) -> String {
    segments.iter().map(MathSegment::to_source).collect()
}
