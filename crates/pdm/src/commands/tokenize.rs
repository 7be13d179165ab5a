use anyhow::Result;
use clap::Parser;
use pdm_conf::Settings;

use crate::args::Args;
use crate::commands::read_input;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Tokenize {
    /// Text to split. Reads stdin when omitted.
    text: Option<String>,
}

impl Command for Tokenize {
    fn execute(&self, _args: &Args, _settings: &Settings) -> Result<Exit> {
        let text = match &self.text {
            Some(text) => text.clone(),
            None => read_input(None)?,
        };

        let segments = pdm_math::tokenize(&text);
        tracing::debug!(segments = segments.len(), "tokenized");
        println!("{}", serde_json::to_string_pretty(&segments)?);
        Ok(Exit::success())
    }
}
