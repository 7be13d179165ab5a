use anyhow::Result;
use clap::Parser;
use pdm_comments::visitor::Fingerprint;
use pdm_conf::Settings;

use crate::args::Args;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct VisitorId {
    /// `navigator.userAgent`
    #[arg(long)]
    user_agent: String,

    /// `navigator.language`
    #[arg(long)]
    language: String,

    /// `Date#getTimezoneOffset()`, in minutes (`-60` for UTC+1).
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    timezone_offset: i32,

    /// Screen size as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_screen)]
    screen: (u32, u32),

    #[arg(long, default_value_t = 24)]
    color_depth: u32,
}

impl Command for VisitorId {
    fn execute(&self, _args: &Args, _settings: &Settings) -> Result<Exit> {
        let (screen_width, screen_height) = self.screen;
        let fingerprint = Fingerprint {
            user_agent: self.user_agent.clone(),
            language: self.language.clone(),
            timezone_offset: self.timezone_offset,
            screen_width,
            screen_height,
            color_depth: self.color_depth,
        };

        println!("{}", fingerprint.visitor_id());
        Ok(Exit::success())
    }
}

fn parse_screen(raw: &str) -> Result<(u32, u32), String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|err| format!("invalid width `{width}`: {err}"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|err| format!("invalid height `{height}`: {err}"))?;
    Ok((width, height))
}
