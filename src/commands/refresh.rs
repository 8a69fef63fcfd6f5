//! # Refresh Command Implementation
//!
//! This module implements the `refresh` subcommand, which regenerates the
//! port catalog from the upstream source tree and persists it for later
//! builds.
//!
//! ## Functionality
//!
//! - **Explicit Ref**: `--ref v1.22.0` inspects the tree at that tag or
//!   branch.
//! - **Latest Release**: `--latest` resolves the newest stable release tag
//!   from the remote tag list first and refreshes at that tag.
//! - **Stable Output**: ports and boards are written sorted, so re-running
//!   against the same ref produces a byte-identical catalog.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;

use portforge::defaults::{self, DEFAULT_UPSTREAM_REF, DEFAULT_UPSTREAM_URL};
use portforge::output::ColorChoice;
use portforge::refresh::CatalogRefresher;

/// Regenerate the port catalog from the upstream source tree
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Git reference (branch or tag) to inspect.
    #[arg(long = "ref", value_name = "REF", default_value = DEFAULT_UPSTREAM_REF)]
    pub ref_name: String,

    /// Use the latest release tag instead of an explicit ref.
    #[arg(long, conflicts_with = "ref_name")]
    pub latest: bool,

    /// Upstream repository to inspect.
    #[arg(long, value_name = "URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream: String,

    /// Output file for the catalog.
    ///
    /// Defaults to the platform data directory
    /// (`~/.local/share/portforge/port_info.json` on Linux).
    /// Can also be set with the `PORTFORGE_CATALOG` environment variable.
    #[arg(short, long, value_name = "FILE", env = "PORTFORGE_CATALOG")]
    pub output: Option<PathBuf>,
}

/// Execute the `refresh` command.
pub fn execute(args: RefreshArgs, color: ColorChoice) -> Result<()> {
    let output = args.output.unwrap_or_else(defaults::default_catalog_path);
    let refresher = CatalogRefresher::new(args.upstream.as_str());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Inspecting {}...", args.upstream));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = if args.latest {
        refresher.refresh_latest()
    } else {
        refresher
            .refresh(&args.ref_name)
            .map(|catalog| (args.ref_name.clone(), catalog))
    };
    spinner.finish_and_clear();

    let (ref_name, catalog) = result?;
    catalog.save(&output)?;

    println!(
        "{} Catalog refreshed at {} ({} ports)",
        color.symbol("✅", "[OK]"),
        ref_name,
        catalog.len()
    );
    println!("   written to {}", output.display());
    Ok(())
}
