//! Integration tests for `story check`

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{story_cmd, write_fixture, SAMPLE_STORIES};

#[test]
fn check_prints_per_user_summary() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);

    story_cmd(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("alice (Alice): 2 stories, 8.0s"))
        .stdout(predicate::str::contains("bob: 1 stories, 3.0s"))
        .stdout(predicate::str::contains("carol: no stories (skipped)"))
        .stdout(predicate::str::contains("Total: 2 users, 3 stories, 11.0s"));
}

#[test]
fn check_uses_configured_default_duration() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);
    let config_dir = dir.path().join("story-player");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[player]\ndefault_duration_ms = 1000\n",
    )
    .unwrap();

    story_cmd(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 users, 3 stories, 7.0s"));
}

#[test]
fn check_rejects_negative_duration() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(
        &dir,
        "bad.json",
        r#"{"users": [{"id": "dave", "stories": [
            {"url": "a.jpg", "type": "image"},
            {"url": "b.jpg", "type": "image", "duration": -5}
        ]}]}"#,
    );

    story_cmd(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("dave:"))
        .stderr(predicate::str::contains("1 user(s) cannot be played"));
}

#[test]
fn check_rejects_file_without_stories() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "empty.json", r#"{"users": [{"id": "x", "stories": []}]}"#);

    story_cmd(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user has any stories"));
}

#[test]
fn check_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "broken.json", "{ not json");

    story_cmd(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid story file"));
}

#[test]
fn check_reports_missing_file() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .arg("check")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
