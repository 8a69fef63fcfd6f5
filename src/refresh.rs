//! # Catalog Refreshing
//!
//! This module regenerates the port catalog from the upstream source tree.
//! A refresh obtains an ephemeral, exclusively-owned working copy of the
//! upstream repository at the requested ref (a fresh `TempDir` per call,
//! deleted on every exit path, success or failure), then scans two fixed
//! directory levels:
//!
//! - top-level `ports/*` directories become catalog ports;
//! - `ports/<port>/boards/*` subdirectories become that port's boards, with
//!   an absent `boards` directory recorded as an empty board set.
//!
//! Directory names are sorted so the regenerated catalog is stable across
//! refreshes and produces no spurious diffs.
//!
//! When a "latest" refresh is requested instead of an explicit ref, the
//! remote tag list is resolved through [`crate::version::select_latest`]
//! first and the winning tag string becomes the ref.
//!
//! ## Design
//!
//! Git access goes through the [`GitOperations`] trait so tests can run the
//! refresher against a fabricated source tree without network access or a
//! git binary. The default implementation wraps the `git` subprocess
//! adapters in [`crate::git`].

use std::fs;
use std::path::Path;

use log::info;
use tempfile::TempDir;

use crate::catalog::PortCatalog;
use crate::defaults::{BOARDS_DIR, PORTS_DIR};
use crate::error::Result;
use crate::version;

/// Trait for git operations - allows stubbing in tests
pub trait GitOperations: Send + Sync {
    /// Clones a repository at a specific Git reference (branch, tag, or
    /// commit). Expected to be a shallow clone.
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()>;

    /// Retrieves a list of all tags from a remote repository.
    fn list_tags(&self, url: &str) -> Result<Vec<String>>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, ref_name, target_dir)
    }

    fn list_tags(&self, url: &str) -> Result<Vec<String>> {
        crate::git::list_tags(url)
    }
}

/// Regenerates the port catalog from an upstream working copy.
pub struct CatalogRefresher {
    upstream_url: String,
    git_ops: Box<dyn GitOperations>,
}

impl CatalogRefresher {
    /// A refresher for the given upstream repository, using the system git.
    pub fn new(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            git_ops: Box::new(DefaultGitOperations),
        }
    }

    /// A refresher with custom `GitOperations`.
    ///
    /// This is primarily used for testing to inject stub operations.
    #[cfg(test)]
    pub fn with_operations(
        upstream_url: impl Into<String>,
        git_ops: Box<dyn GitOperations>,
    ) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            git_ops,
        }
    }

    /// Regenerate the catalog at an explicit upstream ref.
    pub fn refresh(&self, ref_name: &str) -> Result<PortCatalog> {
        // Fresh per call; dropped (and deleted) on every exit path below
        let scratch = TempDir::new()?;
        let checkout = scratch.path().join("upstream");

        info!("Fetching {}@{}", self.upstream_url, ref_name);
        self.git_ops
            .clone_shallow(&self.upstream_url, ref_name, &checkout)?;

        let mut entries = Vec::new();
        for port in list_subdirectories(&checkout.join(PORTS_DIR))? {
            let boards_dir = checkout.join(PORTS_DIR).join(&port).join(BOARDS_DIR);
            let boards = if boards_dir.is_dir() {
                list_subdirectories(&boards_dir)?
            } else {
                Vec::new()
            };
            entries.push((port, boards));
        }

        info!("Catalog regenerated with {} port(s)", entries.len());
        Ok(PortCatalog::from_entries(entries))
    }

    /// Resolve the latest release tag of the upstream repository.
    pub fn resolve_latest_ref(&self) -> Result<String> {
        let tags = self.git_ops.list_tags(&self.upstream_url)?;
        let latest = version::select_latest(&tags)?;
        Ok(latest.to_string())
    }

    /// Regenerate the catalog at the latest release tag.
    ///
    /// Returns the resolved tag alongside the catalog so callers can report
    /// which ref the artifact was generated from.
    pub fn refresh_latest(&self) -> Result<(String, PortCatalog)> {
        let ref_name = self.resolve_latest_ref()?;
        info!("Latest release tag is {}", ref_name);
        let catalog = self.refresh(&ref_name)?;
        Ok((ref_name, catalog))
    }
}

/// Sorted names of the immediate subdirectories of `path`.
fn list_subdirectories(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
