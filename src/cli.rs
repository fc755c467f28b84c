//! CLI entry for the commander demo: clap arguments, config resolution and the run loop.

use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{self, CommanderConfig},
    demo,
    error::{CommanderError, CommanderResult},
};

/// The Cli struct represents the root of the command line interface.
#[derive(Parser, Debug)]
#[command(
    name = "commander",
    about = "Commander: an interactive command dispatcher",
    version
)]
pub struct Cli {
    /// Configuration file to use instead of the project/user lookup
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Root prompt template, overriding the configuration
    #[arg(short, long)]
    pub prompt: Option<String>,
}

impl Cli {
    /// Resolve the configuration: explicit file, else the tier lookup, then CLI overrides.
    pub fn resolve_config(&self) -> CommanderResult<CommanderConfig> {
        let mut config = match &self.config {
            Some(path) => config::load_config_file(path)?,
            None => config::load_config(&std::env::current_dir()?),
        };
        if let Some(prompt) = &self.prompt {
            config.prompt = prompt.clone();
        }
        Ok(config)
    }
}

/// Parse CLI arguments.
/// - `args`: parse from the command line if it's `None`, otherwise parse from the given args
pub fn parse(args: Option<&[&str]>) -> CommanderResult<Cli> {
    match args {
        Some(args) => Cli::try_parse_from(args).map_err(|e| CommanderError::Config(e.to_string())),
        None => Ok(Cli::parse()),
    }
}

/// Build the demo dispatcher tree and run the root loop until input ends.
pub fn run(cli: &Cli) -> CommanderResult<()> {
    let config = cli.resolve_config()?;
    tracing::debug!(?config, "starting commander");
    let root = demo::build_demo(&config)?;
    root.run(std::iter::empty::<String>())
}
