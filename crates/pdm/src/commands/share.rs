use anyhow::Result;
use clap::Parser;
use pdm_comments::share::share_url;
use pdm_conf::Settings;

use crate::args::Args;
use crate::commands::Command;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Share {
    /// Comment id to link to.
    id: String,

    /// Page the thread lives on. Defaults to `site_url` from the settings.
    #[arg(long)]
    base: Option<String>,
}

impl Command for Share {
    fn execute(&self, _args: &Args, settings: &Settings) -> Result<Exit> {
        let Some(base) = self.base.as_deref().or(settings.site_url.as_deref()) else {
            return Ok(Exit::error()
                .with_message("No page to link to: pass --base or set site_url in pdm.toml."));
        };

        println!("{}", share_url(base, &self.id));
        Ok(Exit::success())
    }
}
