//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// A project directory with a UTF-8 word list and a config pointing at it.
fn project(words: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("words.txt"), words).unwrap();
    fs::write(
        tmp.path().join(".rifma.toml"),
        "corpus_path = \"words.txt\"\ncorpus_encoding = \"utf-8\"\nindex_path = \"index.json\"\n",
    )
    .unwrap();
    tmp
}

fn in_dir(dir: &Path) -> Command {
    let mut command = cmd();
    command.args(["-C", dir.to_str().unwrap()]);
    command
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("rhyme"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RIFMA_INDEX_PATH"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_reports_index_state() {
    let tmp = project("кошка\n");
    let output = in_dir(tmp.path()).args(["info", "--json"]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["config"]["index_path"], "index.json");
    assert_eq!(json["config"]["index_present"], false);
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn verbosity_flags_accepted() {
    cmd().args(["--quiet", "info"]).assert().success();
    cmd().args(["-vv", "info"]).assert().success();
    cmd().args(["--color", "never", "info"]).assert().success();
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}

// =============================================================================
// Build Command
// =============================================================================

#[test]
fn build_writes_index() {
    let tmp = project("Кошка\nЛожка\nМошка\n");
    in_dir(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built"));

    let saved = fs::read_to_string(tmp.path().join("index.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["ошка"], serde_json::json!(["кошка", "мошка"]));
    assert_eq!(json["ка"], serde_json::json!(["кошка", "ложка", "мошка"]));
}

#[test]
fn build_keeps_existing_index_unless_forced() {
    let tmp = project("кошка\nложка\n");
    fs::write(tmp.path().join("index.json"), "{}").unwrap();

    in_dir(tmp.path())
        .args(["build", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rebuilt\": false"));

    in_dir(tmp.path())
        .args(["build", "--force", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rebuilt\": true"));
}

#[test]
fn build_reports_missing_corpus() {
    let tmp = project("");
    fs::remove_file(tmp.path().join("words.txt")).unwrap();
    in_dir(tmp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("words.txt"));
}

// =============================================================================
// Rhyme Command
// =============================================================================

#[test]
fn rhyme_prints_one_per_line() {
    let tmp = project("кошка\nложка\nмошка\nдом\n");
    in_dir(tmp.path())
        .args(["rhyme", "  Кошка "])
        .assert()
        .success()
        .stdout(predicate::str::diff("ложка\nмошка\n"));

    // The first lookup built and saved the index.
    assert!(tmp.path().join("index.json").is_file());
}

#[test]
fn rhyme_json_outputs_report() {
    let tmp = project("кошка\nложка\n");
    let output = in_dir(tmp.path())
        .args(["rhyme", "кошка", "--json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["word"], "кошка");
    assert_eq!(json["normalized"], "кошка");
    assert_eq!(json["rhymes"], serde_json::json!(["ложка"]));
    assert_eq!(json["count"], 1);
}

#[test]
fn rhyme_short_word_has_no_rhymes() {
    let tmp = project("ок\nкок\nрок\n");
    in_dir(tmp.path())
        .args(["rhyme", "ок"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn rhyme_blank_word_fails() {
    let tmp = project("кошка\n");
    in_dir(tmp.path())
        .args(["rhyme", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Word is required"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn no_subcommand_shows_help() {
    // arg_required_else_help makes clap print help to stderr and exit 2
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn dictionary_analyzer_without_path_fails() {
    let tmp = project("кошка\n");
    fs::write(tmp.path().join("rifma.toml"), "analyzer = \"dictionary\"\n").unwrap();
    in_dir(tmp.path())
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dictionary_path"));
}
