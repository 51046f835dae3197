// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Import command specs.
//!
//! Everything here runs without Anki: argument validation, table parsing
//! via `--dry-run`, configuration errors and the unreachable-endpoint path.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

// =============================================================================
// Input selection
// =============================================================================

#[test]
fn path_and_url_are_exclusive() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "-p", &table])
        .args(["-u", "https://example.com/cards.tsv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: only one of --path and --url can be supplied",
        ));
}

#[test]
fn path_or_url_is_required() {
    let temp = TempDir::new().unwrap();
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: you must specify either --path or --url",
        ));
}

#[test]
fn note_type_is_required() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-d", "Spanish", "-p", &table])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--note"));
}

#[test]
fn missing_file_is_reported() {
    let temp = TempDir::new().unwrap();
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "-p", "nope.tsv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read nope.tsv"));
}

#[test]
fn unreachable_download_fails() {
    let temp = TempDir::new().unwrap();
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish"])
        .args(["-u", "http://127.0.0.1:1/cards.tsv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "failed to download http://127.0.0.1:1/cards.tsv",
        ));
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn dry_run_counts_records() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 records in 1 decks would be imported (dry run)",
        ));
}

#[yare::parameterized(
    csv_extension = { "cards.csv", "Front,Back\na,b\nc,d\n", None },
    tsv_extension = { "cards.tsv", "Front\tBack\na\tb\nc\td\n", None },
    explicit_semicolon = { "cards.txt", "Front;Back\na;b\nc;d\n", Some(";") },
    explicit_tab = { "cards.txt", "Front\tBack\na\tb\nc\td\n", Some("\\t") },
)]
fn dry_run_delimiters(name: &str, content: &str, delimiter: Option<&str>) {
    let (temp, table) = with_table(name, content);
    let mut cmd = ankisync_in(temp.path());
    cmd.args(["import", "-n", "Basic", "-d", "Deck", "--dry-run", "-p", &table]);
    if let Some(delimiter) = delimiter {
        cmd.args(["--delimiter", delimiter]);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2 records in 1 decks"));
}

#[test]
fn dry_run_quoted_cells_span_lines() {
    let (temp, table) = with_table(
        "quotes.csv",
        "Quotation,Author\n\"Brevity is\nthe soul of wit\",Shakespeare\n\"He said \"\"hi\"\"\",Anon\n",
    );
    ankisync_in(temp.path())
        .args(["import", "-n", "Quote", "-d", "Quotes", "--dry-run", "-p", &table])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records in 1 decks"));
}

#[test]
fn dry_run_does_not_contact_anki() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .args(["--endpoint", UNREACHABLE])
        .assert()
        .success();
}

#[test]
fn row_without_deck_reports_line() {
    let (temp, table) = with_table("cards.csv", "Front,Deck\nhola,Spanish\nciao,\n");
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "--dry-run", "-p", &table])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: line 3: no deck for this row"))
        .stderr(predicate::str::contains("hint: pass --deck"));
}

#[test]
fn unterminated_quote_is_rejected() {
    let (temp, table) = with_table("cards.csv", "Front,Back\n\"hola,hello\n");
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn invalid_delimiter_is_rejected() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .args(["--delimiter", "ab"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid delimiter 'ab'"));
}

#[test]
fn empty_deck_flag_is_rejected() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", " ", "-p", &table])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn zero_batch_size_is_rejected() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "-p", &table])
        .args(["--batch-size", "0"])
        .assert()
        .failure()
        .code(2);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn invalid_local_config_is_reported() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    std::fs::write(temp.path().join("ankisync.toml"), "batch_size = \"lots\"\n").unwrap();

    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: config error: failed to parse"));
}

#[test]
fn unknown_config_key_is_reported() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    std::fs::write(temp.path().join("ankisync.toml"), "batchsize = 10\n").unwrap();

    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batchsize"));
}

#[test]
fn explicit_config_must_exist() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["--config", "missing.toml"])
        .args(["import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read missing.toml"));
}

#[test]
fn endpoint_without_scheme_is_rejected() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["import", "-n", "Basic", "-d", "Spanish", "-p", &table])
        .args(["--endpoint", "localhost:8765"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must start with http://"));
}

// =============================================================================
// Remote failures
// =============================================================================

#[test]
fn unreachable_endpoint_fails_with_hint() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    std::fs::write(temp.path().join("ankisync.toml"), "timeout_secs = 2\n").unwrap();

    ankisync_in(temp.path())
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .args(["import", "-n", "Basic", "-d", "Spanish", "-p", &table])
        .args(["--endpoint", UNREACHABLE])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: failed to connect to http://127.0.0.1:1"))
        .stderr(predicate::str::contains("hint: make sure Anki is running"));
}

#[test]
fn quiet_hides_progress() {
    let (temp, table) = with_table("cards.tsv", VOCAB_TSV);
    ankisync_in(temp.path())
        .args(["-q", "import", "-n", "Basic", "-d", "Spanish", "--dry-run", "-p", &table])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn verbose_and_quiet_conflict() {
    ankisync()
        .args(["-v", "-q", "import", "-n", "Basic", "-p", "x.tsv"])
        .assert()
        .failure()
        .code(2);
}
