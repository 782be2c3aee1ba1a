//! CLI smoke tests for the `docsync` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docsync() -> Command {
    Command::cargo_bin("docsync").unwrap()
}

#[test]
fn help_lists_subcommands() {
    docsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("list-remote"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn bare_invocation_prints_a_hint() {
    docsync()
        .assert()
        .success()
        .stdout(predicate::str::contains("docsync --help"));
}

#[test]
fn init_creates_the_ignore_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.md"), "# notes").unwrap();

    docsync()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".syncignore"));

    assert!(dir.path().join(".syncignore").exists());
}

#[test]
fn init_scaffolds_the_project_config() {
    let dir = TempDir::new().unwrap();

    docsync()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    let config = std::fs::read_to_string(dir.path().join(".docsync.json")).unwrap();
    assert!(config.contains("your-organization-id"));
}

#[test]
fn login_stores_the_session_key_in_the_user_config() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    std::fs::write(
        project.path().join(".docsync.json"),
        r#"{"base_url":"https://docs.example.com","organization_id":"org-1","project_id":"proj-1"}"#,
    )
    .unwrap();

    docsync()
        .current_dir(project.path())
        .env("HOME", home.path())
        .args(["login", "--session-key", "sk-test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://docs.example.com"));

    let stored =
        std::fs::read_to_string(home.path().join(".docsync").join("config.json")).unwrap();
    assert!(stored.contains("sk-test"));
    assert!(stored.contains("https://docs.example.com"));
}

#[test]
fn login_without_project_config_fails() {
    let dir = TempDir::new().unwrap();

    docsync()
        .current_dir(dir.path())
        .args(["login", "--session-key", "sk-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn status_without_project_config_fails() {
    let dir = TempDir::new().unwrap();

    docsync()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
