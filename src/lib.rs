//! Story Player
//!
//! A full-screen, auto-advancing story player: per-user sequences of timed
//! images and videos with progress indicators, hold-to-pause and
//! tap-to-navigate.
//!
//! The playback core (`player`) is independent of any UI toolkit. The
//! terminal host (`term`) is one collaborator that renders its state and
//! feeds it input.

pub mod config;
pub mod deck;
pub mod player;
pub mod story;
pub mod term;

pub use config::Config;
pub use deck::{Deck, DeckStep};
pub use player::{PlaybackState, PlayerError, PlayerEvent, StoryPlayer};
pub use story::{Item, MediaKind, Sequence, StoryFile};
