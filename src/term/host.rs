//! Terminal host state
//!
//! Holds what the terminal host needs beyond the player itself: screen
//! size, overlay toggles, the pointer press being tracked for long-press
//! detection, and the reply line typed while the keyboard overlay is up.

use std::time::{Duration, Instant};

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
    /// Skip to the next user's stories
    NextUser,
    /// Go back to the previous user's stories
    PreviousUser,
    /// Replay the current user's stories from the start
    Restart,
}

/// What a pointer release turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Short press: a tap at this column
    Tap { column: u16 },
    /// End of a press that had become a long press
    LongPressEnd,
}

/// Pointer press in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    column: u16,
    started: Instant,
    long: bool,
}

/// Splits pointer presses into taps and long presses.
///
/// Terminals report button down and up; a press held past the threshold
/// becomes a long press as soon as the host polls, and its release ends the
/// long press instead of tapping.
#[derive(Debug, Clone, Default)]
pub struct PressTracker {
    press: Option<Press>,
}

impl PressTracker {
    pub fn press(&mut self, column: u16, now: Instant) {
        self.press = Some(Press {
            column,
            started: now,
            long: false,
        });
    }

    /// Returns true exactly once, when the current press crosses
    /// `threshold`.
    pub fn poll(&mut self, now: Instant, threshold: Duration) -> bool {
        match &mut self.press {
            Some(press) if !press.long && now.duration_since(press.started) >= threshold => {
                press.long = true;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self) -> Option<Release> {
        let press = self.press.take()?;
        if press.long {
            Some(Release::LongPressEnd)
        } else {
            Some(Release::Tap {
                column: press.column,
            })
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has become a long press.
    pub fn is_long_press(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.long)
    }
}

/// Terminal-side state of the story host.
#[derive(Debug)]
pub struct HostState {
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,
    /// Height the story view is pinned to (frozen while typing a reply)
    pub view_rows: u16,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Space-bar hold toggle (terminals report no key release)
    pub holding: bool,
    /// Simulated text-input overlay with the software keyboard up
    pub keyboard_visible: bool,
    /// Caller-level pause toggle
    pub caller_paused: bool,
    /// Reply being typed while the keyboard overlay is visible
    pub reply: String,
    /// Last reply sent, shown in the footer
    pub last_reply: Option<String>,
    pub press: PressTracker,
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl HostState {
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            term_cols,
            term_rows,
            view_rows: term_rows,
            show_help: false,
            holding: false,
            keyboard_visible: false,
            caller_paused: false,
            reply: String::new(),
            last_reply: None,
            press: PressTracker::default(),
            needs_render: true,
        }
    }

    /// Handle terminal resize event.
    ///
    /// `pinned_rows` is what the player accepted from the layout pass;
    /// `None` keeps the previous view height.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16, pinned_rows: Option<u32>) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        if let Some(rows) = pinned_rows {
            self.view_rows = rows.min(u16::MAX as u32) as u16;
        }
        self.needs_render = true;
    }

    /// Rows actually available to the story view.
    pub fn visible_rows(&self) -> u16 {
        self.view_rows.min(self.term_rows)
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Finish the reply being typed. Returns the sent text, if any.
    pub fn send_reply(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.reply);
        let text = text.trim().to_string();
        self.needs_render = true;
        if text.is_empty() {
            return None;
        }
        self.last_reply = Some(text.clone());
        Some(text)
    }
}
