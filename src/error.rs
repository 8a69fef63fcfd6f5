//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `portforge`. It uses the `thiserror` library to create a comprehensive
//! `Error` enum that covers all anticipated failure modes, providing clear
//! and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! ## Propagation Policy
//!
//! Validation errors (`UnknownPort`, `UnknownBoard`, `MalformedVersion`,
//! `NoReleaseFound`) are raised before any external process is invoked, so
//! they never leave partial side effects behind. Backend and container
//! failures carry the captured error output verbatim and are never retried
//! here; retries belong to a caller or supervisor. `ArtifactMissing` is
//! fatal even when the container exited zero, because artifact presence is
//! the authoritative success signal for a firmware build.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for portforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version string could not be parsed into a `(major, minor, patch)`
    /// triple.
    #[error("Malformed version string {raw:?}: {message}")]
    MalformedVersion { raw: String, message: String },

    /// No release-eligible version remained after filtering a tag list.
    ///
    /// Pre-release tags (those carrying a `-` suffix) are never selected as
    /// "latest"; if a tag list contains nothing else, this is the result.
    #[error("No release version found among {count} tag(s)")]
    NoReleaseFound { count: usize },

    /// The requested port does not exist in the catalog.
    #[error("Unknown port: {port} (known ports: {known})")]
    UnknownPort { port: String, known: String },

    /// The requested board is missing or not valid for the requested port.
    #[error("Unknown board {board:?} for port {port}")]
    UnknownBoard {
        port: String,
        board: Option<String>,
    },

    /// The catalog backing store is missing or malformed.
    #[error("Cannot read port catalog from {}: {message}", path.display())]
    CatalogUnreadable { path: PathBuf, message: String },

    /// A content digest did not look like a 64-character hex sha256.
    #[error("Malformed image digest {digest:?}: expected 64 hex characters")]
    MalformedDigest { digest: String },

    /// No recognized success marker was found in the build backend output.
    #[error("No image id found in build output ({lines} line(s) scanned)")]
    ImageIdNotFound { lines: usize },

    /// The image build backend exited non-zero.
    ///
    /// Carries the captured error stream verbatim for diagnosis.
    #[error("Image build failed for target {target}: {stderr}")]
    BuildBackendFailed { target: String, stderr: String },

    /// The firmware build container exited non-zero.
    #[error("Container run failed for image {image} (exit code {code:?})")]
    ContainerRunFailed { image: String, code: Option<i32> },

    /// The expected firmware artifact did not materialize in the workspace.
    #[error("Firmware artifact missing from {} after container run", dest.display())]
    ArtifactMissing { dest: PathBuf },

    /// The destination workspace contains artifact files from a prior build.
    ///
    /// This is a recoverable, user-resolvable condition: the caller may
    /// remove the listed files (or confirm their removal) and retry.
    #[error("Workspace {} contains residual build artifacts: {}", dest.display(), files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>().join(", "))]
    ResidualArtifacts { dest: PathBuf, files: Vec<PathBuf> },

    /// The destination workspace path exists but is not a usable directory.
    #[error("Workspace path {} is not a directory", path.display())]
    WorkspaceNotADirectory { path: PathBuf },

    /// A build metadata entry contained a separator character.
    #[error("Invalid build metadata entry {entry:?}: {message}")]
    InvalidMetadata { entry: String, message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, ref (branch/tag), and error message.
    #[error("Git clone error for {url}@{r#ref}: {message}")]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
    },

    /// An error occurred while executing a Git command.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// The build backend binary itself could not be invoked.
    #[error("Failed to invoke build backend {program}: {message}")]
    BackendUnavailable { program: String, message: String },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
