//! Input handling for the terminal host.
//!
//! This module handles keyboard and mouse input events, feeding them to the
//! player and returning control flow signals to the run loop.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use std::time::Instant;

use crossterm::event::Event;

use crate::term::host::InputResult;
use crate::term::session::Session;

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `session` - The running story session
/// * `now` - When the event was read (for long-press detection)
///
/// # Returns
/// `InputResult` indicating whether to continue, quit, or switch users
pub fn handle_event(event: Event, session: &mut Session, now: Instant) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, session),
        Event::Mouse(mouse) => handle_mouse_event(mouse, session, now),
        Event::Resize(new_cols, new_rows) => {
            let pinned = session.player.on_layout(new_rows as u32);
            session.host.handle_resize(new_cols, new_rows, pinned);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, etc.
    }
}
