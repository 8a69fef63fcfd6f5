//! End-to-end tests for the `completions` command

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Test that bash completions are generated
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("portforge");

    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("portforge"));
}

/// Test that zsh completions are generated
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("portforge");

    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("portforge"));
}

/// Test that an unsupported shell is rejected
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_unknown_shell() {
    let mut cmd = cargo_bin_cmd!("portforge");

    cmd.arg("completions")
        .arg("tcsh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
