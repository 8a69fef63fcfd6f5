//! Git subprocess adapters: shallow clone and remote tag listing.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Clone a repository at a specific ref using shallow clone
pub fn clone_shallow(url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
    // git won't clone into an existing non-empty dir
    if target_dir.exists() && target_dir.read_dir()?.next().is_some() {
        fs::remove_dir_all(target_dir)?;
    }
    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!("Cloning {}@{} into {}", url, ref_name, target_dir.display());
    let output = Command::new("git")
        .args(["clone", "--depth=1", "--branch", ref_name, url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.to_string()
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message,
        });
    }

    Ok(())
}

/// List all tags from a remote repository
pub fn list_tags(url: &str) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["ls-remote", "--tags", "--refs", url])
        .output()
        .map_err(|e| Error::GitCommand {
            command: "ls-remote --tags --refs".to_string(),
            url: url.to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: "ls-remote --tags --refs".to_string(),
            url: url.to_string(),
            stderr: stderr.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_ls_remote_tags(&stdout))
}

/// Parse `git ls-remote --tags` output into plain tag names.
///
/// Output format is `<hash>\t<ref>` per line with refs like
/// `refs/tags/v1.0.0`. Dereferenced entries (`...^{}`) are dropped so each
/// tag appears once.
pub fn parse_ls_remote_tags(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() == 2 {
                parts[1]
                    .strip_prefix("refs/tags/")
                    .filter(|tag| !tag.ends_with("^{}"))
                    .map(str::to_string)
            } else {
                None
            }
        })
        .collect()
}
