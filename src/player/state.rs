//! Player state types
//!
//! Contains the observed `PlaybackState` record read by the host, the
//! lifecycle `Phase`, the `Epoch` ticket carried by collaborator callbacks,
//! and the `PlayerEvent`s surfaced to the caller.

use std::fmt;
use std::time::Duration;

/// Lifecycle phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not visible, or no sequence shown
    Idle,
    /// Index set, waiting for the media layer to report ready
    Loading,
    /// Loaded and the timer is running
    Playing,
    /// Loaded and the timer is frozen by a pause source
    Paused,
    /// A sequence boundary was reached; no further timer activity
    Completed,
}

impl Phase {
    /// Whether a sequence is on screen (loading, playing or paused).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Loading | Self::Playing | Self::Paused)
    }
}

/// Generation counter attached to every `Loading` transition.
///
/// Ticks and media callbacks carry the epoch that was current when they
/// were dispatched. Mismatches belong to a superseded item and are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which end of the sequence was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Forward navigation past the last item
    End,
    /// Backward navigation before the first item
    Start,
}

/// Notifications for the caller and the host collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A new item entered `Loading`; the media layer should load it and
    /// report back with this epoch.
    ItemStarted { index: usize, epoch: Epoch },
    /// Media for the current item is ready and its clock started
    ItemReady { index: usize },
    /// Effective pause flag flipped while an item was on screen
    PauseChanged { paused: bool },
    /// The media layer could not load the current item. Skipping, retrying
    /// or aborting is up to the caller.
    MediaLoadFailed { index: usize, epoch: Epoch },
    /// A sequence boundary was reached; cross-sequence navigation is up to
    /// the caller.
    Boundary(Boundary),
}

/// State observed by renderers and progress indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub phase: Phase,
    /// Active item
    pub current_index: usize,
    /// Effective pause, derived from the input gate
    pub paused: bool,
    /// Media for the active item reported ready
    pub loaded: bool,
    /// Effective duration of the active item
    pub duration: Duration,
    /// Overlay chrome fade level: 0 until loaded, then 1
    pub opacity: f32,
    /// Elapsed fraction of `duration`
    pub progress: f64,
    /// Epoch of the active item
    pub epoch: Epoch,
}

impl PlaybackState {
    pub fn idle(default_duration: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            current_index: 0,
            paused: false,
            loaded: false,
            duration: default_duration,
            opacity: 0.0,
            progress: 0.0,
            epoch: Epoch::default(),
        }
    }

    /// Elapsed time of the active item.
    pub fn elapsed(&self) -> Duration {
        self.duration.mul_f64(self.progress.clamp(0.0, 1.0))
    }
}

/// Progress of every indicator in a row of `len` indicators.
///
/// Items before `current` are full, items after it are empty.
pub fn indicator_values(len: usize, current: usize, progress: f64) -> Vec<f64> {
    (0..len)
        .map(|i| match i.cmp(&current) {
            std::cmp::Ordering::Less => 1.0,
            std::cmp::Ordering::Equal => progress.clamp(0.0, 1.0),
            std::cmp::Ordering::Greater => 0.0,
        })
        .collect()
}
