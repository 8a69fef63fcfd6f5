//! End-to-end tests for the `build` command
//!
//! These tests cover the validation surface of the command: everything
//! that fails before the container backend would be touched. Builds that
//! reach docker are exercised at the library level with stub backends
//! instead (see `pipeline_e2e.rs`).

mod common;
use common::prelude::*;

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_help() {
    let mut cmd = cargo_bin_cmd!("portforge");

    cmd.arg("build")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Build firmware for a board into a destination workspace",
        ));
}

/// Test that a missing catalog points the user at `refresh`
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_missing_catalog() {
    let fixture = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--catalog")
        .arg("/nonexistent/port_info.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("portforge refresh"));
}

/// Test that an unknown port fails before any build work
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_unknown_port() {
    let fixture = TestFixture::new().with_sample_catalog();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--port")
        .arg("esp99")
        .arg("--catalog")
        .arg(fixture.catalog_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown port: esp99"));
}

/// Test that a board-ful port without a board fails validation
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_missing_board() {
    let fixture = TestFixture::new().with_sample_catalog();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--port")
        .arg("rp2")
        .arg("--catalog")
        .arg(fixture.catalog_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown board"));
}

/// Test that a wrong board for the port fails validation
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_wrong_board() {
    let fixture = TestFixture::new().with_sample_catalog();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--port")
        .arg("rp2")
        .arg("--board")
        .arg("PYBV11")
        .arg("--catalog")
        .arg(fixture.catalog_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown board"));
}

/// Test that a malformed --meta argument is rejected by argument parsing
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_malformed_meta() {
    let fixture = TestFixture::new().with_sample_catalog();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--meta")
        .arg("notapair")
        .arg("--catalog")
        .arg(fixture.catalog_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

/// Test that the catalog can come from the environment variable
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_build_catalog_from_env() {
    let fixture = TestFixture::new().with_sample_catalog();

    let mut cmd = cargo_bin_cmd!("portforge");
    cmd.arg("build")
        .arg(fixture.path().join("out"))
        .arg("--port")
        .arg("esp99")
        .env("PORTFORGE_CATALOG", fixture.catalog_path())
        .assert()
        .failure()
        // catalog was found (no refresh hint); validation fails instead
        .stderr(predicate::str::contains("Unknown port: esp99"));
}
