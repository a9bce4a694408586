//! Integration tests for CLI parsing and `story play` argument handling

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{story_cmd, write_fixture, SAMPLE_STORIES};

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn play_help_shows_overrides() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--duration-ms"))
        .stdout(predicate::str::contains("--no-progress"))
        .stdout(predicate::str::contains("--split"));
}

#[test]
fn play_without_file_is_usage_error() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn play_unknown_user_fails_before_starting() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);

    story_cmd(dir.path())
        .arg("play")
        .arg(&file)
        .args(["--user", "zed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 'zed' not found"));
}

#[test]
fn play_user_without_stories_is_not_selectable() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);

    story_cmd(dir.path())
        .arg("play")
        .arg(&file)
        .args(["--user", "carol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no stories"));
}

#[test]
fn play_rejects_split_outside_unit_interval() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);

    story_cmd(dir.path())
        .arg("play")
        .arg(&file)
        .args(["--split", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tap_split_ratio"));
}

#[test]
fn play_rejects_negative_duration() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(
        &dir,
        "bad.json",
        r#"{"users": [{"id": "dave", "stories": [
            {"url": "a.jpg", "type": "image", "duration": -1}
        ]}]}"#,
    );

    story_cmd(dir.path())
        .arg("play")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 'dave' cannot be played"));
}

#[test]
fn log_option_creates_log_file() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "stories.json", SAMPLE_STORIES);
    let log = dir.path().join("story.log");

    story_cmd(dir.path())
        .arg("--log")
        .arg(&log)
        .arg("check")
        .arg(&file)
        .assert()
        .success();
    assert!(log.exists());
}
