//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use portforge::output::ColorChoice;

use crate::commands;

/// Portforge - Containerized firmware builds for embedded ports
#[derive(Parser, Debug)]
#[command(name = "portforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build firmware for a board into a destination workspace
    Build(commands::build::BuildArgs),

    /// Build the container image for a port and print its reference
    Image(commands::image::ImageArgs),

    /// Regenerate the port catalog from the upstream source tree
    Refresh(commands::refresh::RefreshArgs),

    /// Print the latest release tag of the upstream repository
    Latest(commands::latest::LatestArgs),

    /// List ports and boards from the persisted catalog
    Ports(commands::ports::PortsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        let color: ColorChoice = self
            .color
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        match self.command {
            Commands::Build(args) => commands::build::execute(args, color),
            Commands::Image(args) => commands::image::execute(args, color),
            Commands::Refresh(args) => commands::refresh::execute(args, color),
            Commands::Latest(args) => commands::latest::execute(args),
            Commands::Ports(args) => commands::ports::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
