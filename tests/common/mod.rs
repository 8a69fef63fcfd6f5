//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sample_catalog();
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::catalogs;
    pub use super::TestFixture;
}

/// Catalog JSON snippets for testing.
#[allow(dead_code)]
pub mod catalogs {
    /// A small catalog with one board-ful and one board-less port.
    pub const SAMPLE: &str = r#"{
  "rp2": ["RPI_PICO", "RPI_PICO_W"],
  "unix": []
}
"#;

    /// Invalid JSON for error testing.
    pub const MALFORMED: &str = "{ not json";
}

/// A test fixture that provides a temporary directory with an optional
/// catalog file.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_sample_catalog();
///
/// let mut cmd = cargo_bin_cmd!("portforge");
/// cmd.arg("ports")
///     .arg("--catalog")
///     .arg(fixture.catalog_path())
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `port_info.json` catalog file with the given content.
    pub fn with_catalog(self, content: &str) -> Self {
        self.temp_dir
            .child("port_info.json")
            .write_str(content)
            .expect("Failed to write catalog file");
        self
    }

    /// Add the small sample catalog.
    pub fn with_sample_catalog(self) -> Self {
        self.with_catalog(catalogs::SAMPLE)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the catalog file.
    pub fn catalog_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("port_info.json")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
