//! # Container Build Backend
//!
//! This module wraps the external container tooling (`docker`) behind the
//! [`BackendOperations`] trait so the image builder and the firmware
//! pipeline never talk to a subprocess directly. This mirrors how git
//! access is abstracted for the refresher: the default implementation
//! shells out, while tests substitute stubs and run the whole pipeline
//! without docker installed.
//!
//! Two operations are exposed:
//!
//! - **Image build**: `docker build [-t <tag>] --target <target> <context>`,
//!   with stdout and stderr captured separately. Interleaving them would
//!   make the success-marker line scan non-deterministic, so they are kept
//!   apart.
//! - **Container run**: `docker run --rm` with bind mounts and environment
//!   variables, stdio inherited so the in-container build log streams to
//!   the user. Only the exit code is reported back.
//!
//! Both operations block until the subprocess exits. A subprocess killed by
//! an external supervisor reports the same way as any other non-zero exit.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Captured result of an image build invocation.
///
/// Standard output and standard error are captured separately (not
/// interleaved) to keep line scanning over either stream deterministic.
#[derive(Debug, Clone)]
pub struct BackendOutput {
    /// Whether the backend exited zero.
    pub success: bool,
    /// Raw exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// A host directory bind-mounted into the container.
#[derive(Debug, Clone)]
pub struct Mount {
    /// Absolute path on the host.
    pub host: PathBuf,
    /// Mount point inside the container.
    pub container: String,
}

/// Trait for container backend operations - allows stubbing in tests
pub trait BackendOperations: Send + Sync {
    /// Build a container image for `target`, optionally naming it `tag`.
    ///
    /// Returns the captured output regardless of exit status; callers
    /// decide how to treat failure.
    fn build_image(&self, tag: Option<&str>, target: &str) -> Result<BackendOutput>;

    /// Run `image` in an ephemeral, auto-removed container with the given
    /// bind mounts and environment variables.
    ///
    /// Returns the container exit code, `None` if killed by a signal.
    fn run_container(
        &self,
        image: &str,
        mounts: &[Mount],
        env: &[(String, String)],
    ) -> Result<Option<i32>>;
}

/// The default backend: shells out to the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerBackend {
    program: String,
    context: PathBuf,
}

impl DockerBackend {
    /// A docker backend building from the given context directory.
    pub fn new(context: impl AsRef<Path>) -> Self {
        Self {
            program: "docker".to_string(),
            context: context.as_ref().to_path_buf(),
        }
    }
}

impl Default for DockerBackend {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BackendOperations for DockerBackend {
    fn build_image(&self, tag: Option<&str>, target: &str) -> Result<BackendOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("build");
        if let Some(tag) = tag {
            cmd.args(["-t", tag]);
        }
        cmd.args(["--target", target]).arg(&self.context);

        debug!("Invoking image build: {:?}", cmd);
        let output = cmd.output().map_err(|e| Error::BackendUnavailable {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        Ok(BackendOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_container(
        &self,
        image: &str,
        mounts: &[Mount],
        env: &[(String, String)],
    ) -> Result<Option<i32>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["run", "--rm"]);
        for mount in mounts {
            cmd.arg("--mount").arg(format!(
                "type=bind,source={},target={}",
                mount.host.display(),
                mount.container
            ));
        }
        for (key, value) in env {
            cmd.arg("--env").arg(format!("{}={}", key, value));
        }
        cmd.arg(image);

        debug!("Invoking container run: {:?}", cmd);
        // stdio is inherited so the in-container build log streams through
        let status = cmd.status().map_err(|e| Error::BackendUnavailable {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        Ok(status.code())
    }
}
