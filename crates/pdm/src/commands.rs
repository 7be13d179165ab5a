mod notify;
mod share;
mod thread;
mod tokenize;
mod visitor_id;

use std::io::Read as _;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use clap::Subcommand;
use pdm_conf::Settings;

use crate::args::Args;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args, settings: &Settings) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum PdmCommand {
    /// Build and print a comment thread from backend rows
    Thread(self::thread::Thread),
    /// Split text into plain and math segments
    Tokenize(self::tokenize::Tokenize),
    /// Validate a new comment and compose its notification e-mail
    Notify(self::notify::Notify),
    /// Derive an anonymous visitor id from browser properties
    VisitorId(self::visitor_id::VisitorId),
    /// Print the share link for a comment
    Share(self::share::Share),
}

impl Command for PdmCommand {
    fn execute(&self, args: &Args, settings: &Settings) -> Result<Exit> {
        match self {
            Self::Thread(command) => command.execute(args, settings),
            Self::Tokenize(command) => command.execute(args, settings),
            Self::Notify(command) => command.execute(args, settings),
            Self::VisitorId(command) => command.execute(args, settings),
            Self::Share(command) => command.execute(args, settings),
        }
    }
}

/// Read `path`, or stdin when no path is given.
fn read_input(path: Option<&Utf8Path>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
