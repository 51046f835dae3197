// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version specs.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[yare::parameterized(
    long = { "--help" },
    short = { "-h" },
)]
fn help_lists_commands(flag: &str) {
    ankisync()
        .arg(flag)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn help_shows_quickstart() {
    ankisync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Get started:"))
        .stdout(predicate::str::contains("ankisync import -p cards.tsv"));
}

#[test]
fn no_color_output_is_plain() {
    ankisync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[yare::parameterized(
    path = { "--path" },
    url = { "--url" },
    deck = { "--deck" },
    note = { "--note" },
    sync = { "--sync" },
    suspend = { "--suspend" },
    key_field = { "--key-field" },
    batch_size = { "--batch-size" },
    delimiter = { "--delimiter" },
    endpoint = { "--endpoint" },
    dry_run = { "--dry-run" },
)]
fn import_help_lists_flag(flag: &str) {
    ankisync()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(flag));
}

#[test]
fn import_help_shows_examples() {
    ankisync()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"))
        .stdout(predicate::str::contains("Columns:"));
}

#[test]
fn help_subcommand_matches_flag() {
    let flag = ankisync().args(["import", "--help"]).output().unwrap();
    let sub = ankisync().args(["help", "import"]).output().unwrap();
    assert_eq!(
        String::from_utf8_lossy(&flag.stdout),
        String::from_utf8_lossy(&sub.stdout)
    );
}

#[test]
fn version_prints_package_version() {
    ankisync()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ankisync {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_command_shows_usage() {
    ankisync()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_command_fails() {
    ankisync()
        .arg("export")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
