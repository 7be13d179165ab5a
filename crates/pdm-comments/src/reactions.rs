//! Thumbs up/down reactions.
//!
//! The backend stores one row per `(comment_id, visitor_id)`; the widget
//! shows per-comment totals and highlights the current visitor's choice.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::record::CommentRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Reaction {
    Up,
    Down,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown reaction value {0}, expected 1 or -1")]
pub struct UnknownReaction(pub i8);

impl TryFrom<i8> for Reaction {
    type Error = UnknownReaction;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(UnknownReaction(other)),
        }
    }
}

impl From<Reaction> for i8 {
    fn from(reaction: Reaction) -> Self {
        match reaction {
            Reaction::Up => 1,
            Reaction::Down => -1,
        }
    }
}

/// A `comment_reactions` row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRow {
    pub comment_id: String,
    pub visitor_id: String,
    pub reaction: Reaction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub upvotes: u32,
    pub downvotes: u32,
    #[serde(rename = "my_reaction", default)]
    pub mine: Option<Reaction>,
}

impl ReactionSummary {
    fn record(&mut self, reaction: Reaction, is_mine: bool) {
        match reaction {
            Reaction::Up => self.upvotes += 1,
            Reaction::Down => self.downvotes += 1,
        }
        if is_mine {
            self.mine = Some(reaction);
        }
    }
}

/// Per-comment totals for `rows`, with `visitor_id`'s own reaction marked.
#[must_use]
pub fn tally(rows: &[ReactionRow], visitor_id: &str) -> FxHashMap<String, ReactionSummary> {
    let mut tallies: FxHashMap<String, ReactionSummary> = FxHashMap::default();

    for row in rows {
        tallies
            .entry(row.comment_id.clone())
            .or_default()
            .record(row.reaction, row.visitor_id == visitor_id);
    }

    tallies
}

/// Attach a summary to every record; records without rows get zero counts.
pub fn enrich(records: &mut [CommentRecord], tallies: &FxHashMap<String, ReactionSummary>) {
    for record in records {
        record.reactions = Some(tallies.get(&record.id).cloned().unwrap_or_default());
    }
}

/// What to send to the backend when a visitor presses a reaction button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionChange {
    /// Delete the visitor's row; pressing the held reaction again undoes it.
    Remove,
    /// Insert or replace the visitor's row.
    Upsert(Reaction),
}

impl ReactionChange {
    #[must_use]
    pub fn decide(current: Option<Reaction>, requested: Reaction) -> Self {
        if current == Some(requested) {
            Self::Remove
        } else {
            Self::Upsert(requested)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(comment: &str, visitor: &str, reaction: Reaction) -> ReactionRow {
        ReactionRow {
            comment_id: comment.to_string(),
            visitor_id: visitor.to_string(),
            reaction,
        }
    }

    #[test]
    fn test_reaction_wire_values() {
        let rows: Vec<ReactionRow> = serde_json::from_str(
            r#"[
                {"comment_id": "a", "visitor_id": "v_1", "reaction": 1},
                {"comment_id": "a", "visitor_id": "v_2", "reaction": -1}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].reaction, Reaction::Up);
        assert_eq!(rows[1].reaction, Reaction::Down);
        assert_eq!(serde_json::to_string(&Reaction::Down).unwrap(), "-1");
    }

    #[test]
    fn test_unknown_reaction_rejected() {
        let result: Result<ReactionRow, _> =
            serde_json::from_str(r#"{"comment_id": "a", "visitor_id": "v", "reaction": 0}"#);
        assert!(result.is_err());
        assert_eq!(Reaction::try_from(2_i8), Err(UnknownReaction(2)));
    }

    #[test]
    fn test_tally_counts_and_marks_mine() {
        let rows = vec![
            row("a", "v_me", Reaction::Up),
            row("a", "v_2", Reaction::Up),
            row("a", "v_3", Reaction::Down),
            row("b", "v_2", Reaction::Down),
        ];
        let tallies = tally(&rows, "v_me");

        assert_eq!(
            tallies["a"],
            ReactionSummary {
                upvotes: 2,
                downvotes: 1,
                mine: Some(Reaction::Up),
            }
        );
        assert_eq!(
            tallies["b"],
            ReactionSummary {
                upvotes: 0,
                downvotes: 1,
                mine: None,
            }
        );
    }

    #[test]
    fn test_enrich_defaults_missing_to_zero() {
        let mut records = vec![CommentRecord::new("a", "t1"), CommentRecord::new("z", "t2")];
        let tallies = tally(&[row("a", "v", Reaction::Up)], "v");
        enrich(&mut records, &tallies);

        assert_eq!(records[0].reactions.as_ref().unwrap().upvotes, 1);
        assert_eq!(records[1].reactions, Some(ReactionSummary::default()));
    }

    #[test]
    fn test_pressing_held_reaction_removes_it() {
        assert_eq!(
            ReactionChange::decide(Some(Reaction::Up), Reaction::Up),
            ReactionChange::Remove
        );
        assert_eq!(
            ReactionChange::decide(Some(Reaction::Up), Reaction::Down),
            ReactionChange::Upsert(Reaction::Down)
        );
        assert_eq!(
            ReactionChange::decide(None, Reaction::Down),
            ReactionChange::Upsert(Reaction::Down)
        );
    }

    #[test]
    fn test_summary_serializes_my_reaction() {
        let summary = ReactionSummary {
            upvotes: 3,
            downvotes: 0,
            mine: Some(Reaction::Up),
        };
        insta::assert_snapshot!(
            serde_json::to_string(&summary).unwrap(),
            @r#"{"upvotes":3,"downvotes":0,"my_reaction":1}"#
        );
    }
}
