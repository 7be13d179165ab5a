//! Threaded comments for the book's discussion section.
//!
//! Comment rows arrive from the hosted database as a flat, newest-first list
//! where each row may name a parent. This crate turns that list into an owned
//! reply forest and carries the small pieces of logic the widget needs around
//! it:
//!
//! - [`tree`]: forest construction, counting, lookup and depth-first walks
//! - [`reactions`]: thumbs up/down tallies and toggle decisions
//! - [`submit`]: validation of new comments before insert
//! - [`share`]: shareable links to a single comment
//! - [`visitor`]: anonymous visitor ids derived from a browser fingerprint
//! - [`display`]: timestamp parsing and formatting
//!
//! Fetching, inserting and visibility filtering belong to the backend; nothing
//! here performs I/O.

pub mod display;
pub mod reactions;
mod record;
pub mod share;
pub mod submit;
pub mod tree;
pub mod visitor;

pub use reactions::Reaction;
pub use reactions::ReactionSummary;
pub use record::CommentRecord;
pub use record::ANONYMOUS;
pub use submit::NewComment;
pub use submit::SubmissionError;
pub use tree::build_tree;
pub use tree::total_count;
pub use tree::CommentNode;
