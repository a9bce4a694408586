//! Story data model
//!
//! A story file holds one `Sequence` per user. Each sequence is an ordered
//! list of `Item`s; insertion order is playback order.
//!
//! ```json
//! {
//!   "users": [
//!     {
//!       "id": "alice",
//!       "name": "Alice",
//!       "stories": [
//!         { "url": "https://cdn.example/a.jpg", "type": "image", "duration": 3000 },
//!         { "url": "https://cdn.example/b.mp4", "type": "video" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Kind of media an item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// One media unit in a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Media reference handed to the media layer
    pub url: String,
    /// Image or video
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Explicit display duration in milliseconds.
    ///
    /// `None` or `0` falls back to the configured default. Negative values
    /// are rejected when the sequence is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl Item {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Image,
            duration: None,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration = Some(duration_ms);
        self
    }
}

/// Ordered items belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "stories", default)]
    pub items: Vec<Item>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            name: None,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Name shown in the header, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Errors reading a story file.
#[derive(Debug, thiserror::Error)]
pub enum StoryFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid story file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Story file contains no users")]
    NoUsers,
}

/// A parsed story file: every user's sequence, in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryFile {
    pub users: Vec<Sequence>,
}

impl StoryFile {
    /// Load and parse a story file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoryFileError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoryFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a story file from a JSON string.
    pub fn parse(content: &str) -> Result<Self, StoryFileError> {
        let file: StoryFile = serde_json::from_str(content)?;
        if file.users.is_empty() {
            return Err(StoryFileError::NoUsers);
        }
        Ok(file)
    }

    /// Hand out shared sequences; the player references them, never copies.
    pub fn into_sequences(self) -> Vec<Arc<Sequence>> {
        self.users.into_iter().map(Arc::new).collect()
    }
}
