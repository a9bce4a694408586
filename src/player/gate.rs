//! Input gate: merges independent pause sources into one paused flag.

use std::fmt;

/// An independently controlled input that can hold playback paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseSource {
    /// Finger (or pointer) held down on the story
    UserHold,
    /// A text-input overlay or software keyboard has focus
    KeyboardOverlay,
    /// The embedding application asked for a pause
    Caller,
}

impl PauseSource {
    pub const ALL: [PauseSource; 3] = [Self::UserHold, Self::KeyboardOverlay, Self::Caller];

    fn bit(self) -> u8 {
        match self {
            Self::UserHold => 1 << 0,
            Self::KeyboardOverlay => 1 << 1,
            Self::Caller => 1 << 2,
        }
    }
}

impl fmt::Display for PauseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserHold => "user-hold",
            Self::KeyboardOverlay => "keyboard-overlay",
            Self::Caller => "caller",
        };
        f.write_str(name)
    }
}

/// Set of active pause sources.
///
/// Playback is paused while any source is active. Sources are set and
/// cleared independently; setting an already active source is a no-op, so
/// one clear undoes any number of sets from the same source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputGate {
    active: u8,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a source. Returns true if the effective paused flag
    /// changed.
    pub fn set_source(&mut self, source: PauseSource, active: bool) -> bool {
        let was_paused = self.is_paused();
        if active {
            self.active |= source.bit();
        } else {
            self.active &= !source.bit();
        }
        was_paused != self.is_paused()
    }

    pub fn is_active(&self, source: PauseSource) -> bool {
        self.active & source.bit() != 0
    }

    pub fn is_paused(&self) -> bool {
        self.active != 0
    }

    /// Sources currently holding playback.
    pub fn active_sources(&self) -> impl Iterator<Item = PauseSource> + '_ {
        PauseSource::ALL
            .into_iter()
            .filter(move |source| self.is_active(*source))
    }
}
