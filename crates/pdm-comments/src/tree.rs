//! Reply forest construction.
//!
//! [`build_tree`] never fails and never drops a record. Whatever the shape of
//! the parent references, every input record ends up in the output exactly
//! once:
//!
//! - no parent, or a parent id that is not in the batch: root
//! - a parent id equal to the record's own id: root
//! - a parent cycle (A under B under A): the earliest record of the cycle, in
//!   input order, becomes a root and the rest hang below it
//!
//! Root order is the input order. Every reply list is sorted oldest first.

use chrono::DateTime;
use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::record::CommentRecord;

/// A comment together with its replies. Owned; nothing is shared with the
/// input slice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub record: CommentRecord,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// This comment plus all of its descendants.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + total_count(&self.replies)
    }
}

/// Unlinks descendants onto a heap stack so a deep chain is freed without one
/// stack frame per level.
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// Build the reply forest for a batch of records and return its roots.
#[must_use]
pub fn build_tree(records: &[CommentRecord]) -> Vec<CommentNode> {
    let forest = ThreadBuilder::new(records).build();
    tracing::debug!(
        records = records.len(),
        roots = forest.len(),
        "built comment tree"
    );
    forest
}

/// Number of comments in the forest, replies included.
#[must_use]
pub fn total_count(forest: &[CommentNode]) -> usize {
    walk(forest).count()
}

/// Depth-first lookup by comment id.
#[must_use]
pub fn find<'a>(forest: &'a [CommentNode], id: &str) -> Option<&'a CommentNode> {
    walk(forest).map(|(_, node)| node).find(|node| node.id() == id)
}

/// Pre-order traversal yielding each node with its depth (roots are 0).
#[must_use]
pub fn walk(forest: &[CommentNode]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().map(|node| (0, node)).collect(),
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a CommentNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a CommentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.replies.iter().rev().map(|reply| (depth + 1, reply)));
        Some((depth, node))
    }
}

/// Reply ordering key: parsed timestamps first, chronologically, then
/// unparseable ones by their raw text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Parsed(DateTime<Utc>),
    Raw(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(record: &'a CommentRecord) -> Self {
        match record.timestamp() {
            Some(timestamp) => Self::Parsed(timestamp),
            None => Self::Raw(&record.created_at),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    OnPath,
    Settled,
}

/// Builds the forest over record positions, then materializes owned nodes.
struct ThreadBuilder<'a> {
    records: &'a [CommentRecord],
    parents: Vec<Option<usize>>,
}

impl<'a> ThreadBuilder<'a> {
    fn new(records: &'a [CommentRecord]) -> Self {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        index.reserve(records.len());
        for (position, record) in records.iter().enumerate() {
            // Duplicate ids: the last record wins the lookup.
            index.insert(record.id.as_str(), position);
        }

        let parents = records
            .iter()
            .map(|record| {
                record
                    .parent()
                    .filter(|parent| *parent != record.id)
                    .and_then(|parent| index.get(parent).copied())
            })
            .collect();

        Self { records, parents }
    }

    fn build(mut self) -> Vec<CommentNode> {
        self.break_cycles();

        let (roots, children) = self.link();
        self.materialize(&roots, children)
    }

    /// Cut every parent cycle so each record reaches a root.
    ///
    /// Walks up from each record in input order. Hitting a record already on
    /// the current path means the path closed a cycle; its earliest member is
    /// detached and becomes a root.
    fn break_cycles(&mut self) {
        let mut state = vec![Visit::Pending; self.records.len()];
        let mut path: Vec<usize> = Vec::new();

        for start in 0..self.records.len() {
            let mut current = Some(start);

            while let Some(position) = current {
                match state[position] {
                    Visit::Settled => break,
                    Visit::OnPath => {
                        let cycle_start = path
                            .iter()
                            .position(|&member| member == position)
                            .unwrap_or_default();
                        if let Some(&earliest) = path[cycle_start..].iter().min() {
                            tracing::warn!(
                                id = %self.records[earliest].id,
                                "comment parent chain forms a cycle, promoting to root"
                            );
                            self.parents[earliest] = None;
                        }
                        break;
                    }
                    Visit::Pending => {
                        state[position] = Visit::OnPath;
                        path.push(position);
                        current = self.parents[position];
                    }
                }
            }

            for position in path.drain(..) {
                state[position] = Visit::Settled;
            }
        }
    }

    /// Root positions in input order, and each position's replies oldest first.
    fn link(&self) -> (Vec<usize>, Vec<Vec<usize>>) {
        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); self.records.len()];

        for (position, parent) in self.parents.iter().enumerate() {
            match parent {
                Some(parent) => children[*parent].push(position),
                None => roots.push(position),
            }
        }

        let keys: Vec<SortKey<'_>> = self.records.iter().map(SortKey::of).collect();
        for replies in &mut children {
            replies.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
        }

        (roots, children)
    }

    /// Turn position lists into owned nodes, children before parents, without
    /// recursion.
    fn materialize(&self, roots: &[usize], mut children: Vec<Vec<usize>>) -> Vec<CommentNode> {
        let mut order = Vec::with_capacity(self.records.len());
        let mut stack: Vec<usize> = roots.to_vec();
        while let Some(position) = stack.pop() {
            order.push(position);
            stack.extend(children[position].iter().copied());
        }

        let mut built: Vec<Option<CommentNode>> = (0..self.records.len()).map(|_| None).collect();
        for &position in order.iter().rev() {
            let replies = std::mem::take(&mut children[position])
                .into_iter()
                .filter_map(|child| built[child].take())
                .collect();
            built[position] = Some(CommentNode {
                record: self.records[position].clone(),
                replies,
            });
        }

        roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}
