use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use pdm_comments::display::format_timestamp;
use pdm_comments::reactions::enrich;
use pdm_comments::reactions::tally;
use pdm_comments::reactions::ReactionRow;
use pdm_comments::tree::walk;
use pdm_comments::build_tree;
use pdm_comments::total_count;
use pdm_comments::CommentNode;
use pdm_comments::CommentRecord;
use pdm_comments::Reaction;
use pdm_conf::Settings;
use pdm_math::MathSegment;

use crate::args::Args;
use crate::commands::read_input;
use crate::commands::Command;
use crate::exit::Exit;

const INDENT: &str = "  ";

#[derive(Debug, Parser)]
pub struct Thread {
    /// JSON array of comment rows. Reads stdin when omitted.
    file: Option<Utf8PathBuf>,

    /// JSON array of reaction rows to tally onto the comments.
    #[arg(long)]
    reactions: Option<Utf8PathBuf>,

    /// Visitor id whose own reactions are marked.
    #[arg(long, requires = "reactions")]
    visitor: Option<String>,

    /// Print the forest as JSON instead of an outline.
    #[arg(long)]
    json: bool,
}

impl Command for Thread {
    fn execute(&self, _args: &Args, _settings: &Settings) -> Result<Exit> {
        let input = read_input(self.file.as_deref())?;
        let mut records: Vec<CommentRecord> =
            serde_json::from_str(&input).context("Failed to parse comment rows")?;

        if let Some(path) = &self.reactions {
            let input = read_input(Some(path))?;
            let rows: Vec<ReactionRow> =
                serde_json::from_str(&input).context("Failed to parse reaction rows")?;
            let tallies = tally(&rows, self.visitor.as_deref().unwrap_or_default());
            enrich(&mut records, &tallies);
        }

        let forest = build_tree(&records);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&forest)?);
        } else {
            println!("{}", render_outline(&forest));
        }

        Ok(Exit::success())
    }
}

/// Indented text rendering of a thread, math marked as `⟨inline⟩` and
/// `⟦block⟧`.
fn render_outline(forest: &[CommentNode]) -> String {
    let mut lines = vec![format!("Comments ({})", total_count(forest))];

    for (depth, node) in walk(forest) {
        let indent = INDENT.repeat(depth);
        let record = &node.record;

        let mut heading = format!(
            "{indent}- {} · {}",
            record.display_author(),
            format_timestamp(&record.created_at)
        );
        if let Some(summary) = &record.reactions {
            let mine = match summary.mine {
                Some(Reaction::Up) => ", you +",
                Some(Reaction::Down) => ", you -",
                None => "",
            };
            heading.push_str(&format!(
                " [+{} -{}{mine}]",
                summary.upvotes, summary.downvotes
            ));
        }
        lines.push(heading);

        let body = render_body(&record.body_segments());
        lines.extend(body.lines().map(|line| format!("{indent}{INDENT}{line}")));
    }

    lines.join("\n")
}

fn render_body(segments: &[MathSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            MathSegment::Text { value } => value.clone(),
            MathSegment::InlineMath { expression } => format!("⟨{expression}⟩"),
            MathSegment::BlockMath { expression } => format!("⟦{expression}⟧"),
        })
        .collect()
}
