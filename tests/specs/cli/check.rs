// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command specs.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn check_unreachable_endpoint_exits_1() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("ankisync.toml"), "timeout_secs = 2\n").unwrap();

    ankisync_in(temp.path())
        .args(["check", "--endpoint", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("127.0.0.1:1"));
}

#[test]
fn check_uses_endpoint_from_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("ankisync.toml"),
        format!("url = \"{UNREACHABLE}\"\ntimeout_secs = 2\n"),
    )
    .unwrap();

    ankisync_in(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("127.0.0.1:1"));
}

#[test]
fn check_uses_user_config_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".config").join("ankisync");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "url = \"ftp://example.com\"\n").unwrap();

    let output = ankisync_in(temp.path()).arg("check").output().unwrap();

    // dirs::config_dir honours XDG_CONFIG_HOME on Linux only.
    if cfg!(target_os = "linux") {
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid url 'ftp://example.com'"), "{stderr}");
    }
}

#[test]
fn check_rejects_extra_arguments() {
    ankisync()
        .args(["check", "extra"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn config_flag_wins_over_environment() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("bad.toml"), "url = \"ftp://example.com\"\n").unwrap();
    std::fs::write(
        temp.path().join("good.toml"),
        format!("url = \"{UNREACHABLE}\"\ntimeout_secs = 2\n"),
    )
    .unwrap();

    ankisync_in(temp.path())
        .env("ANKISYNC_CONFIG", temp.path().join("bad.toml"))
        .args(["--config", "good.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("127.0.0.1:1"));

    ankisync_in(temp.path())
        .env("ANKISYNC_CONFIG", temp.path().join("bad.toml"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid url 'ftp://example.com'"));
}
