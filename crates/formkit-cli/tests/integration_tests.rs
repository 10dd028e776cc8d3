//! Integration tests for the `formkit` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with no user config directory or `FORMKIT__` overrides in play.
fn formkit() -> Command {
    let mut cmd = Command::cargo_bin("formkit").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/formkit-tests")
        .env_remove("FORMKIT__REPORT__TITLE")
        .env_remove("FORMKIT__REPORT__PAGE_LINES")
        .env_remove("RUST_LOG");
    cmd
}

// ── basics ───────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_commands() {
    formkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_version_flag() {
    formkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    formkit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formkit"));
}

// ── list / show ──────────────────────────────────────────────────────────────

#[test]
fn test_list_table() {
    formkit()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 book(s)"))
        .stdout(predicate::str::contains("Dogra Magra"));
}

#[test]
fn test_list_filters_by_category() {
    formkit()
        .args(["list", "--category", "comic", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Majo - Igarashi Daisuke"))
        .stdout(predicate::str::contains("Dogra Magra").not());
}

#[test]
fn test_list_csv() {
    formkit()
        .args(["list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,title,author,publisher,category,price,purchase_date,review_point",
        ))
        .stdout(predicate::str::contains(
            "4,Koto no Oni,Edogawa Ranpo,Kodansha,Novel,250,2014-05-20,3",
        ));
}

#[test]
fn test_list_json() {
    let output = formkit()
        .args(["--output-format", "json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 10);
    assert_eq!(books[2]["title"], "Kyomu e no Kumotsu");
    assert_eq!(books[7]["category"], "comic");
}

#[test]
fn test_show_book() {
    formkit()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 1: Dogra Magra - Yumeno Kyusaku"))
        .stdout(predicate::str::contains("[read-only]"))
        .stdout(predicate::str::contains("Enter the price."));
}

// ── edit ─────────────────────────────────────────────────────────────────────

#[test]
fn test_edit_without_commit_reports_and_discards() {
    formkit()
        .args(["edit", "2", "--set", "Price=900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price=900: set"))
        .stdout(predicate::str::contains("Price changed"))
        .stdout(predicate::str::contains("rerun with --commit"));
}

#[test]
fn test_edit_commit() {
    formkit()
        .args(["edit", "2", "-s", "Price=900", "-s", "PurchaseDate=2015/03/01", "--commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 2 committed"))
        .stdout(predicate::str::contains("Price: 800 -> 900"))
        .stdout(predicate::str::contains("PurchaseDate: 2014-02-12 -> 2015-03-01"));
}

#[test]
fn test_edit_json_summary() {
    let output = formkit()
        .args(["--output-format", "json", "edit", "3", "--set", "ReviewPoint=2", "--commit"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["committed"], true);
    assert_eq!(summary["changes"][0]["field"], "ReviewPoint");
    assert_eq!(summary["record"]["review_point"], 2);
}

#[test]
fn test_rejected_edit_blocks_commit() {
    formkit()
        .args(["edit", "2", "--set", "ReviewPoint=9", "--commit"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ReviewPoint=9: rejected"))
        .stdout(predicate::str::contains("Review point is invalid."))
        .stderr(predicate::str::contains("Book 2 was not committed"));
}

#[test]
fn test_commit_without_changes_is_refused() {
    formkit()
        .args(["edit", "1", "--set", "Title=Dogra Magra", "--commit"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("unchanged"))
        .stderr(predicate::str::contains("nothing changed"));
}

#[test]
fn test_edit_id_is_read_only() {
    formkit()
        .args(["edit", "1", "--set", "Id=7"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn test_edit_unparseable_value() {
    formkit()
        .args(["edit", "1", "--set", "Price=cheap"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid value for Price"));
}

#[test]
fn test_edit_missing_book() {
    formkit()
        .args(["edit", "99", "--set", "Price=1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No record with id 99"))
        .stderr(predicate::str::contains("formkit list"));
}

#[test]
fn test_edit_duplicate_assignment() {
    formkit()
        .args(["edit", "1", "--set", "Price=1", "--set", "Price=2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("assigned more than once"));
}

// ── add ──────────────────────────────────────────────────────────────────────

#[test]
fn test_add_book() {
    formkit()
        .args([
            "add",
            "--set",
            "Title=Sanshiro",
            "--set",
            "Author=Natsume Soseki",
            "--set",
            "Publisher=Shinchosha",
            "--set",
            "Category=novel",
            "--set",
            "Price=430",
            "--set",
            "PurchaseDate=2015-01-05",
            "--set",
            "ReviewPoint=3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added book 11: Sanshiro - Natsume Soseki"));
}

#[test]
fn test_add_incomplete_book() {
    formkit()
        .args(["add", "--set", "Title=Sanshiro"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Author: Author is required."))
        .stderr(predicate::str::contains("Validation failed"));
}

// ── report ───────────────────────────────────────────────────────────────────

#[test]
fn test_report_paginates() {
    formkit()
        .args(["report", "--page-lines", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book List"))
        .stdout(predicate::str::contains("Page.3"))
        .stdout(predicate::str::contains("Page.4").not())
        .stdout(predicate::str::contains("★★★★★"));
}

#[test]
fn test_report_to_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.txt");

    formkit()
        .args(["report", "--title", "Shelf", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Shelf"));
    assert!(text.contains("Negative"));
}

// ── config / init ────────────────────────────────────────────────────────────

#[test]
fn test_config_defaults() {
    formkit()
        .args(["config", "get", "report.page_lines"])
        .assert()
        .success()
        .stdout("23\n");
}

#[test]
fn test_config_file_and_env_layers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("formkit.toml");
    fs::write(&path, "[report]\ntitle = \"From File\"\npage_lines = 5\n").unwrap();

    formkit()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "report.title"])
        .assert()
        .success()
        .stdout("From File\n");

    formkit()
        .env("FORMKIT__REPORT__PAGE_LINES", "7")
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "report.page_lines"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_config_unknown_key() {
    formkit()
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_config_file() {
    formkit()
        .args(["--config", "/nonexistent/formkit.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_init_local() {
    let temp = TempDir::new().unwrap();

    formkit()
        .current_dir(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let written = fs::read_to_string(temp.path().join("formkit.toml")).unwrap();
    assert!(written.contains("[report]"));
    assert!(written.contains("page_lines = 23"));

    formkit()
        .current_dir(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
