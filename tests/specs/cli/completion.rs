// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Completion command specs.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = ankisync().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty(), "Completion output should not be empty");
}

#[test]
fn completion_bash_contains_commands() {
    ankisync()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_ankisync"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn completion_zsh_generates_valid_script() {
    ankisync()
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef ankisync"));
}

#[test]
fn completion_fish_includes_import_flags() {
    ankisync()
        .args(["completion", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c ankisync"))
        .stdout(predicate::str::contains("dry-run"));
}

#[test]
fn completion_without_shell_shows_help() {
    ankisync()
        .arg("completion")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn completion_invalid_shell_fails() {
    ankisync()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
