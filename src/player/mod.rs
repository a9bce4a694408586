//! Story playback core
//!
//! Drives a full-screen, auto-advancing story: which item is showing, how
//! long it has been showing, when it advances, and how taps, long presses
//! and overlays interrupt that timeline. Rendering and media decoding are
//! left to the host, which reads `PlaybackState` and feeds events back.
//!
//! # Architecture
//!
//! - `timer`: ProgressTimer, the per-item progress clock
//! - `navigation`: tap classification and next/previous resolution
//! - `gate`: InputGate, merges pause sources into one paused flag
//! - `machine`: StoryPlayer, the state machine tying them together
//! - `state`: observed state, phases, epochs and events
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use story_player::config::PlayerConfig;
//! use story_player::player::{PlayerEvent, StoryPlayer};
//! use story_player::story::{Item, Sequence};
//!
//! let mut player = StoryPlayer::new(PlayerConfig::default()).unwrap();
//! let sequence = Arc::new(Sequence::new("alice", vec![Item::image("a.jpg")]));
//! player.show(sequence).unwrap();
//!
//! // The media layer reports ready with the epoch it was dispatched under
//! player.on_image_loaded(player.epoch());
//! let events = player.tick(player.epoch(), Duration::from_secs(3));
//! assert!(matches!(events[..], [PlayerEvent::Boundary(_)]));
//! ```

mod error;
pub mod gate;
mod machine;
pub mod navigation;
pub mod state;
pub mod timer;

pub use error::PlayerError;
pub use gate::{InputGate, PauseSource};
pub use machine::{validate_sequence, StoryPlayer};
pub use navigation::{classify_tap, resolve, Decision, NavEvent};
pub use state::{Boundary, Epoch, Phase, PlaybackState, PlayerEvent};
pub use timer::{ProgressTimer, Tick};
