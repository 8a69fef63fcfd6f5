//! # Ports Command Implementation
//!
//! This module implements the `ports` subcommand, which lists the ports
//! (and optionally the boards of one port) from the persisted catalog.
//! This is a safe, read-only operation that does not modify any files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use portforge::catalog::PortCatalog;
use portforge::defaults;

/// List ports and boards from the persisted catalog
#[derive(Args, Debug)]
pub struct PortsArgs {
    /// Show the boards of this port instead of the port list.
    #[arg(value_name = "PORT")]
    pub port: Option<String>,

    /// Path to the port catalog file.
    ///
    /// Defaults to the platform data directory
    /// (`~/.local/share/portforge/port_info.json` on Linux).
    /// Can also be set with the `PORTFORGE_CATALOG` environment variable.
    #[arg(long, value_name = "FILE", env = "PORTFORGE_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Execute the `ports` command.
pub fn execute(args: PortsArgs) -> Result<()> {
    let catalog_path = args.catalog.unwrap_or_else(defaults::default_catalog_path);
    let catalog = PortCatalog::load(&catalog_path)?;

    match args.port {
        Some(port) => {
            // Unknown port surfaces the same error the build gate raises
            catalog.validate(&port, None).or_else(|e| match e {
                portforge::error::Error::UnknownBoard { .. } => Ok(()),
                other => Err(other),
            })?;
            let boards = catalog.boards(&port).unwrap_or(&[]);
            if boards.is_empty() {
                println!("{} takes no board parameter", port);
            } else {
                for board in boards {
                    println!("{}", board);
                }
            }
        }
        None => {
            for port in catalog.ports() {
                let boards = catalog.boards(port).unwrap_or(&[]);
                println!("{} ({} boards)", port, boards.len());
            }
        }
    }
    Ok(())
}
