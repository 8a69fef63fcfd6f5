//! Default values for portforge configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Upstream firmware source repository.
pub const DEFAULT_UPSTREAM_URL: &str = "https://github.com/micropython/micropython.git";

/// Upstream ref used when neither an explicit ref nor `--latest` is given.
pub const DEFAULT_UPSTREAM_REF: &str = "master";

/// File name of the persisted port catalog.
pub const CATALOG_FILENAME: &str = "port_info.json";

/// Directory inside the upstream tree that holds one subdirectory per port.
pub const PORTS_DIR: &str = "ports";

/// Directory inside a port that holds one subdirectory per board.
pub const BOARDS_DIR: &str = "boards";

/// Fixed path inside the build container where the workspace is mounted.
pub const CONTAINER_BUILD_DIR: &str = "/home/app/build";

/// Environment variable telling the in-container build where to write output.
pub const ENV_FIRMWARE_DEST: &str = "FIRMWARE_DEST";

/// Environment variable naming the board to build for.
pub const ENV_FIRMWARE_BOARD: &str = "FIRMWARE_BOARD";

/// Environment variable carrying the combined extra build metadata string.
pub const ENV_FIRMWARE_METADATA: &str = "FIRMWARE_METADATA";

/// Base name (extension-independent) of the firmware artifact.
pub const FIRMWARE_ARTIFACT_STEM: &str = "firmware";

/// Base name (extension-independent) of the build-metadata sidecar artifact.
pub const METADATA_ARTIFACT_STEM: &str = "build_metadata";

/// Artifact base names that mark a workspace as holding a prior build.
pub const ARTIFACT_STEMS: &[&str] = &[FIRMWARE_ARTIFACT_STEM, METADATA_ARTIFACT_STEM];

/// Returns the default catalog file path.
///
/// Uses the platform-appropriate data directory:
/// - Linux: `~/.local/share/portforge/port_info.json` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/portforge/port_info.json`
/// - Windows: `{FOLDERID_LocalAppData}\portforge\port_info.json`
///
/// Falls back to `.portforge/port_info.json` in the current directory if the
/// platform data directory cannot be determined.
///
/// This can be overridden by the `--catalog` CLI flag or the
/// `PORTFORGE_CATALOG` environment variable.
pub fn default_catalog_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from(".portforge"))
        .join("portforge")
        .join(CATALOG_FILENAME)
}
