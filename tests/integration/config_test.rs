//! Integration tests for `story config`

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{config_file, story_cmd};

#[test]
fn config_path_is_under_config_home() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("story-player"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_prints_defaults_without_file() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("default_duration_ms = 3000"))
        .stdout(predicate::str::contains("caller_pause = \"always\""))
        .stdout(predicate::str::contains("[terminal]"))
        .stdout(predicate::str::contains("on_load_failure = \"skip\""));
}

#[test]
fn config_init_writes_file_once() {
    let dir = TempDir::new().unwrap();

    story_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(config_file(dir.path()).exists());

    story_cmd(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    story_cmd(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_reflects_file_values() {
    let dir = TempDir::new().unwrap();
    let path = config_file(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[player]\ntap_split_ratio = 0.25\n").unwrap();

    story_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tap_split_ratio = 0.25"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = config_file(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[player]\ntap_split_ratio = 1.5\n").unwrap();

    story_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tap_split_ratio"));
}
