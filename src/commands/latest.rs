//! # Latest Command Implementation
//!
//! This module implements the `latest` subcommand, which queries the
//! remote tag list of the upstream repository, filters out pre-release
//! tags, and prints the newest stable release tag. The printed tag is
//! exactly what `refresh --latest` would resolve to, so it composes in
//! scripts:
//!
//! ```bash
//! portforge refresh --ref "$(portforge latest)"
//! ```

use anyhow::Result;
use clap::Args;

use portforge::defaults::DEFAULT_UPSTREAM_URL;
use portforge::refresh::CatalogRefresher;

/// Print the latest release tag of the upstream repository
#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Repository to list tags from.
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub repo: String,
}

/// Execute the `latest` command.
pub fn execute(args: LatestArgs) -> Result<()> {
    let refresher = CatalogRefresher::new(args.repo.as_str());
    let tag = refresher.resolve_latest_ref()?;
    println!("{}", tag);
    Ok(())
}
