//! # Firmware Build Pipeline
//!
//! The pipeline runs one firmware build from validated inputs to a verified
//! artifact. Per invocation it moves through five stages, failing out of
//! any of them:
//!
//! 1. **Validated** - the (port, board) pair is checked against the catalog
//!    and the extra metadata is checked for separator characters, before
//!    any build work starts.
//! 2. **ImageResolved** - a caller-supplied image reference is used as-is
//!    (pinning a previously built image for repeatable builds); otherwise
//!    the per-port image is built now.
//! 3. **WorkspacePrepared** - the destination directory is created if
//!    missing; residual artifacts from a prior build require confirmed
//!    removal before the run proceeds.
//! 4. **ContainerRun** - the build runs in an ephemeral, auto-removed
//!    container with the workspace bind-mounted at a fixed path and the
//!    output location, board, and metadata exported as environment
//!    variables.
//! 5. **ArtifactVerified** - the firmware file must exist in the workspace
//!    afterwards. The container exit code alone is not trusted as evidence
//!    of success; the artifact's presence is the source of truth.
//!
//! All stages are synchronous; the only suspension points are the blocking
//! subprocess calls behind [`BackendOperations`].

use std::path::PathBuf;

use log::info;

use crate::backend::{BackendOperations, Mount};
use crate::catalog::PortCatalog;
use crate::defaults::{
    CONTAINER_BUILD_DIR, ENV_FIRMWARE_BOARD, ENV_FIRMWARE_DEST, ENV_FIRMWARE_METADATA,
};
use crate::error::{Error, Result};
use crate::image::ImageBuilder;
use crate::workspace;

/// Everything needed for one firmware build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Target platform family, e.g. `rp2`.
    pub port: String,
    /// Hardware variant within the port, if the port takes one.
    pub board: Option<String>,
    /// Image build target; defaults to the port name.
    pub target: Option<String>,
    /// Destination workspace for the firmware artifact.
    pub dest: PathBuf,
    /// Pre-built image reference; skips the image build when set.
    pub image: Option<String>,
    /// Extra metadata passed opaquely to the in-container build.
    pub metadata: Vec<(String, String)>,
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The image reference the firmware was built with.
    pub image: String,
    /// Path of the verified firmware artifact.
    pub firmware: PathBuf,
}

/// Decides whether residual artifacts found in the workspace may be
/// removed.
///
/// The interactive CLI asks the user; non-interactive callers plug in
/// [`AutoApprove`] or [`NeverApprove`].
pub trait ResidualPrompt {
    /// Return `true` to remove the listed files and continue the build.
    fn confirm_removal(&self, files: &[PathBuf]) -> Result<bool>;
}

/// Approves residual-artifact removal without interaction.
pub struct AutoApprove;

impl ResidualPrompt for AutoApprove {
    fn confirm_removal(&self, _files: &[PathBuf]) -> Result<bool> {
        Ok(true)
    }
}

/// Declines residual-artifact removal; the build aborts with the file list.
pub struct NeverApprove;

impl ResidualPrompt for NeverApprove {
    fn confirm_removal(&self, _files: &[PathBuf]) -> Result<bool> {
        Ok(false)
    }
}

/// Combine metadata pairs into the single env string the container reads.
///
/// Pairs are joined as `key=value` entries separated by commas, so neither
/// character may appear in a key or value. Keys may also not be empty.
pub fn combine_metadata(metadata: &[(String, String)]) -> Result<String> {
    let mut entries = Vec::with_capacity(metadata.len());
    for (key, value) in metadata {
        let entry = format!("{}={}", key, value);
        if key.is_empty() {
            return Err(Error::InvalidMetadata {
                entry,
                message: "empty key".to_string(),
            });
        }
        if key.contains(['=', ',']) || value.contains(['=', ',']) {
            return Err(Error::InvalidMetadata {
                entry,
                message: "keys and values may not contain '=' or ','".to_string(),
            });
        }
        entries.push(entry);
    }
    Ok(entries.join(","))
}

/// Orchestrates one firmware build over a catalog and a build backend.
pub struct FirmwareBuildPipeline<'a> {
    catalog: &'a PortCatalog,
    backend: &'a dyn BackendOperations,
}

impl<'a> FirmwareBuildPipeline<'a> {
    /// A pipeline validating against `catalog` and building via `backend`.
    pub fn new(catalog: &'a PortCatalog, backend: &'a dyn BackendOperations) -> Self {
        Self { catalog, backend }
    }

    /// Run the full pipeline for one request.
    ///
    /// `prompt` is consulted only when residual artifacts are found in the
    /// destination; a declined removal aborts with
    /// [`Error::ResidualArtifacts`].
    pub fn run(
        &self,
        request: &BuildRequest,
        prompt: &dyn ResidualPrompt,
    ) -> Result<BuildOutcome> {
        // Validated: cheap fail-fast gate before any build work
        self.catalog
            .validate(&request.port, request.board.as_deref())?;
        let metadata = combine_metadata(&request.metadata)?;

        // ImageResolved: a pinned reference takes precedence
        let image = match &request.image {
            Some(image) => {
                info!("Using pinned image {}", image);
                image.clone()
            }
            None => ImageBuilder::new(self.backend).build(
                &request.port,
                request.target.as_deref(),
                None,
            )?,
        };

        // WorkspacePrepared
        workspace::prepare(&request.dest)?;
        let residual = workspace::residual_artifacts(&request.dest)?;
        if !residual.is_empty() {
            if prompt.confirm_removal(&residual)? {
                workspace::remove_residual_artifacts(&residual)?;
            } else {
                return Err(Error::ResidualArtifacts {
                    dest: request.dest.clone(),
                    files: residual,
                });
            }
        }

        // ContainerRun: docker needs an absolute mount source
        let dest = request.dest.canonicalize()?;
        let mounts = [Mount {
            host: dest.clone(),
            container: CONTAINER_BUILD_DIR.to_string(),
        }];
        let mut env = vec![(
            ENV_FIRMWARE_DEST.to_string(),
            CONTAINER_BUILD_DIR.to_string(),
        )];
        if let Some(board) = &request.board {
            env.push((ENV_FIRMWARE_BOARD.to_string(), board.clone()));
        }
        if !metadata.is_empty() {
            env.push((ENV_FIRMWARE_METADATA.to_string(), metadata));
        }

        info!("Building firmware for port {} in {}", request.port, image);
        let code = self.backend.run_container(&image, &mounts, &env)?;
        if code != Some(0) {
            return Err(Error::ContainerRunFailed { image, code });
        }

        // ArtifactVerified: file presence is authoritative
        let firmware =
            workspace::firmware_artifact(&dest)?.ok_or(Error::ArtifactMissing {
                dest: dest.clone(),
            })?;
        info!("Firmware written to {}", firmware.display());

        Ok(BuildOutcome { image, firmware })
    }
}
