//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Two users: alice with a timed image and an untimed video, bob with one
/// image. An empty third user is skipped by the player.
pub const SAMPLE_STORIES: &str = r#"{
    "users": [
        {
            "id": "alice",
            "name": "Alice",
            "stories": [
                { "url": "beach.jpg", "type": "image", "duration": 5000 },
                { "url": "waves.mp4", "type": "video" }
            ]
        },
        {
            "id": "bob",
            "stories": [
                { "url": "cat.jpg", "type": "image", "duration": 0 }
            ]
        },
        { "id": "carol", "stories": [] }
    ]
}"#;

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// `story` command with its config directory redirected into `config_home`.
pub fn story_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_story"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("STORY_LOG");
    cmd
}

/// Where `story` keeps its config under `config_home`.
pub fn config_file(config_home: &Path) -> PathBuf {
    config_home.join("story-player").join("config.toml")
}
