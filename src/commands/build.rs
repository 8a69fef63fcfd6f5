//! # Build Command Implementation
//!
//! This module implements the `build` subcommand, which runs the full
//! firmware build pipeline: validate the (port, board) pair against the
//! catalog, resolve or build the container image, prepare the destination
//! workspace, run the build container, and verify the firmware artifact.
//!
//! ## Functionality
//!
//! - **Input Validation**: (port, board) is checked against the persisted
//!   catalog before anything is built.
//! - **Image Pinning**: `--image` skips the image build and reuses a
//!   previously built reference for repeatable builds.
//! - **Residual Guard**: artifacts left in the destination by a prior run
//!   are listed and removed only after confirmation (`--yes` skips the
//!   prompt).
//! - **Metadata Propagation**: `--meta key=value` pairs are combined and
//!   exported to the in-container build.

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

use portforge::backend::DockerBackend;
use portforge::catalog::PortCatalog;
use portforge::defaults;
use portforge::error::Error;
use portforge::output::ColorChoice;
use portforge::pipeline::{AutoApprove, BuildRequest, FirmwareBuildPipeline, ResidualPrompt};

/// Build firmware for a board into a destination workspace
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// The destination directory to save the firmware.
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// The port to build firmware for.
    #[arg(short, long, default_value = "rp2")]
    pub port: String,

    /// The board to build firmware for (required for ports with boards).
    #[arg(short, long)]
    pub board: Option<String>,

    /// The image build target; defaults to the port name.
    #[arg(short, long)]
    pub target: Option<String>,

    /// A pre-built image reference to use instead of building one.
    #[arg(short, long)]
    pub image: Option<String>,

    /// Path to the port catalog file.
    ///
    /// Defaults to the platform data directory
    /// (`~/.local/share/portforge/port_info.json` on Linux).
    /// Can also be set with the `PORTFORGE_CATALOG` environment variable.
    #[arg(long, value_name = "FILE", env = "PORTFORGE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Extra build metadata passed to the container as `key=value`.
    /// May be repeated.
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_meta)]
    pub metadata: Vec<(String, String)>,

    /// Remove residual artifacts from the destination without prompting.
    #[arg(short, long)]
    pub yes: bool,
}

/// Parse one `--meta key=value` argument.
fn parse_meta(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", raw)),
    }
}

/// Asks the user whether residual artifacts may be removed.
struct ConfirmRemoval;

impl ResidualPrompt for ConfirmRemoval {
    fn confirm_removal(&self, files: &[PathBuf]) -> portforge::error::Result<bool> {
        println!("The destination already contains build artifacts:");
        for file in files {
            println!("  {}", file.display());
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Remove them and continue?")
            .default(false)
            .interact()
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
    }
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs, color: ColorChoice) -> Result<()> {
    let catalog_path = args.catalog.unwrap_or_else(defaults::default_catalog_path);
    let catalog = PortCatalog::load(&catalog_path).with_context(|| {
        format!(
            "No usable port catalog at {} (run `portforge refresh` first)",
            catalog_path.display()
        )
    })?;

    let backend = DockerBackend::default();
    let pipeline = FirmwareBuildPipeline::new(&catalog, &backend);
    let request = BuildRequest {
        port: args.port,
        board: args.board,
        target: args.target,
        dest: args.dest,
        image: args.image,
        metadata: args.metadata,
    };

    let outcome = if args.yes {
        pipeline.run(&request, &AutoApprove)
    } else {
        pipeline.run(&request, &ConfirmRemoval)
    }?;

    println!(
        "{} Firmware built with {}",
        color.symbol("✅", "[OK]"),
        outcome.image
    );
    println!("   {}", outcome.firmware.display());
    Ok(())
}
