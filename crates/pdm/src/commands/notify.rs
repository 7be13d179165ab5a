use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use pdm_comments::NewComment;
use pdm_conf::Settings;
use pdm_notify::Email;
use pdm_notify::Notification;

use crate::args::Args;
use crate::commands::read_input;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Notify {
    /// JSON comment payload (`author_name`, `content`, `parent_id`). Reads
    /// stdin when omitted.
    file: Option<Utf8PathBuf>,
}

impl Command for Notify {
    fn execute(&self, _args: &Args, settings: &Settings) -> Result<Exit> {
        let input = read_input(self.file.as_deref())?;
        let payload: NewComment =
            serde_json::from_str(&input).context("Failed to parse comment payload")?;

        let comment = match NewComment::new(
            &payload.author_name,
            &payload.content,
            payload.parent_id,
            &settings.limits,
        ) {
            Ok(comment) => comment,
            Err(err) => return Ok(Exit::error().with_message(err.to_string())),
        };

        match Notification::prepare(&comment, &settings.notify) {
            Ok(Notification::Skipped) => {
                Ok(Exit::success().with_message("Email notification not configured"))
            }
            Ok(Notification::Ready(email)) => {
                println!("POST {}", Email::endpoint(&settings.notify.mailgun_domain));
                println!("{email}");
                Ok(Exit::success())
            }
            Err(err) => Ok(Exit::error().with_message(err.to_string())),
        }
    }
}
