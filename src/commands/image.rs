//! # Image Command Implementation
//!
//! This module implements the `image` subcommand, which builds the
//! container image for a port without running a firmware build, and prints
//! the resulting image reference. The reference can later be pinned with
//! `portforge build --image <reference>` for repeatable builds.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;

use portforge::backend::DockerBackend;
use portforge::image::ImageBuilder;
use portforge::output::ColorChoice;

/// Build the container image for a port and print its reference
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// The port to build an image for.
    #[arg(short, long, default_value = "rp2")]
    pub port: String,

    /// The image build target; defaults to the port name.
    #[arg(short, long)]
    pub target: Option<String>,

    /// A name to tag the built image with.
    #[arg(long)]
    pub tag: Option<String>,

    /// The build context directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub context: PathBuf,
}

/// Execute the `image` command.
///
/// The image reference is printed alone on stdout so the command composes
/// in scripts; progress goes to stderr.
pub fn execute(args: ImageArgs, color: ColorChoice) -> Result<()> {
    let backend = DockerBackend::new(&args.context);
    let builder = ImageBuilder::new(&backend);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Building image for port {}...", args.port));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = builder.build(&args.port, args.target.as_deref(), args.tag.as_deref());
    spinner.finish_and_clear();

    let reference = result?;
    eprintln!("{} Image built", color.symbol("✅", "[OK]"));
    println!("{}", reference);
    Ok(())
}
