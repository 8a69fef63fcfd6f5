//! # Workspace Preparation
//!
//! The workspace is the destination directory that receives the firmware
//! artifact and the optional build-metadata sidecar. Preparation is
//! idempotent: a missing directory is created, an already-empty one is left
//! untouched, and calling it twice is a no-op both times.
//!
//! A workspace holding artifact files from a previous run (any file whose
//! base name matches one of the expected artifact stems, regardless of
//! extension) is never overwritten silently. The offending files are
//! surfaced to the caller, who must confirm their removal before the build
//! proceeds.
//!
//! The residual check is check-then-act, not atomic. Two invocations
//! targeting the same destination can race past it; callers needing
//! exactly-once semantics per destination must add external locking, e.g. a
//! directory-scoped advisory lock.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::defaults::ARTIFACT_STEMS;
use crate::error::{Error, Result};

/// Ensure the destination directory exists and is usable.
///
/// Creates the directory (and parents) if missing. Fails with
/// [`Error::WorkspaceNotADirectory`] if the path exists but is not a
/// directory. Idempotent.
pub fn prepare(dest: &Path) -> Result<()> {
    if dest.exists() {
        if !dest.is_dir() {
            return Err(Error::WorkspaceNotADirectory {
                path: dest.to_path_buf(),
            });
        }
        debug!("Workspace {} already exists", dest.display());
        return Ok(());
    }
    fs::create_dir_all(dest)?;
    info!("Created workspace {}", dest.display());
    Ok(())
}

/// List residual artifact files from a prior build in `dest`.
///
/// Only plain files directly in the destination are considered;
/// subdirectories are left alone. A file counts as residual when its base
/// name (extension stripped) matches one of the expected artifact stems.
/// The result is sorted for stable reporting.
pub fn residual_artifacts(dest: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dest)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str());
        if stem.is_some_and(|stem| ARTIFACT_STEMS.contains(&stem)) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Locate the firmware artifact in `dest`, whatever its extension.
///
/// Returns the first file (in name order) whose base name matches the
/// firmware artifact stem, or `None` when the build produced nothing.
pub fn firmware_artifact(dest: &Path) -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dest)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str());
        if stem == Some(crate::defaults::FIRMWARE_ARTIFACT_STEM) {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Remove previously detected residual artifact files.
///
/// Callers are expected to have confirmed removal with the user first.
pub fn remove_residual_artifacts(files: &[PathBuf]) -> Result<()> {
    for file in files {
        info!("Removing residual artifact {}", file.display());
        fs::remove_file(file)?;
    }
    Ok(())
}
