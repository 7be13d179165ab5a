use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use pdm_conf::Settings;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::PdmCommand;

/// Command-line tools for the book's discussion section.
#[derive(Parser)]
#[command(name = "pdm")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: PdmCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments, load settings and execute the chosen command.
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    let project_root = resolve_project_root()?;
    let settings =
        Settings::new(project_root.as_std_path()).context("Failed to load settings")?;
    let _guard = crate::logging::init_tracing(&cli.args.global, &settings);
    tracing::debug!(%project_root, "settings loaded");

    let exit = cli.command.execute(&cli.args, &settings)?;
    Ok(exit.report(cli.args.global.quiet))
}

fn resolve_project_root() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| anyhow::anyhow!("Current directory is not UTF-8: {}", path.display()))
}
