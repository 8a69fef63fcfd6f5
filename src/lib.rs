//! # Portforge Library
//!
//! This library provides the core functionality for orchestrating
//! reproducible cross-compiled firmware builds inside containers. It is
//! designed to be used by the `portforge` command-line tool but can also be
//! integrated into other applications that drive the same build flow.
//!
//! ## Quick Example
//!
//! ```
//! use portforge::catalog::PortCatalog;
//! use portforge::version;
//!
//! // Validate build inputs against a port catalog
//! let catalog = PortCatalog::from_entries([
//!     ("rp2", vec!["RPI_PICO", "RPI_PICO_W"]),
//!     ("unix", vec![]),
//! ]);
//! assert!(catalog.validate("rp2", Some("RPI_PICO_W")).is_ok());
//! assert!(catalog.validate("rp2", None).is_err());
//!
//! // Resolve "latest" from a remote tag list
//! let tags = vec![
//!     "v1.2.0".to_string(),
//!     "v1.10.0".to_string(),
//!     "v1.9.9-preview".to_string(),
//! ];
//! let latest = version::select_latest(&tags).unwrap();
//! assert_eq!(latest.to_string(), "v1.10.0");
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Port Catalog (`catalog`)**: An immutable port → boards mapping,
//!   generated offline from the upstream source tree and loaded read-only
//!   at build time to validate inputs.
//! - **Version Resolution (`version`)**: Parsing of loose upstream version
//!   tags and selection of the latest stable release.
//! - **Build Identification (`identify`)**: A pure text scan that extracts
//!   a stable image reference from the build backend's output, across
//!   backend output formats.
//! - **Backends (`backend`, `git`)**: Subprocess adapters for the container
//!   tooling and git, behind traits so everything above them is testable
//!   with stubs.
//! - **Pipeline (`pipeline`, `workspace`, `image`)**: The staged firmware
//!   build: validate, resolve an image, prepare the workspace, run the
//!   build container, verify the artifact.
//! - **Refreshing (`refresh`)**: Regeneration of the catalog from an
//!   ephemeral upstream working copy.
//!
//! ## Execution Flow
//!
//! A firmware build runs through `pipeline::FirmwareBuildPipeline`:
//!
//! 1.  **Validate**: check (port, board) against the catalog; fail fast.
//! 2.  **Resolve image**: use the pinned reference, or build the per-port
//!     image and extract its reference from the backend output.
//! 3.  **Prepare workspace**: create the destination if missing; surface
//!     residual artifacts from prior runs for confirmed removal.
//! 4.  **Run container**: ephemeral container, workspace bind-mounted,
//!     output location / board / metadata exported as environment.
//! 5.  **Verify artifact**: the firmware file must exist afterwards;
//!     its presence, not the exit code, is the success signal.
//!
//! Catalog maintenance runs separately through `refresh::CatalogRefresher`,
//! which clones the upstream source at a requested (or latest-release) ref
//! into a scoped temporary directory and rebuilds the catalog from its
//! directory layout.

pub mod backend;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod git;
pub mod identify;
pub mod image;
pub mod output;
pub mod pipeline;
pub mod refresh;
pub mod version;
pub mod workspace;

#[cfg(test)]
mod version_proptest;
