//! Mouse input handling for the terminal host.
//!
//! A left-button press starts tracking; the run loop turns a long hold into
//! a long press, and the release either ends that long press or taps at the
//! pressed column.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::term::host::{InputResult, Release};
use crate::term::session::Session;

/// Handle a mouse event.
pub fn handle_mouse_event(mouse: MouseEvent, session: &mut Session, now: Instant) -> InputResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            session.host.press.press(mouse.column, now);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            match session.host.press.release() {
                Some(Release::Tap { column }) => {
                    let width = session.host.term_cols as f64;
                    let events = session.player.tap(column as f64, width);
                    session.push(events);
                }
                Some(Release::LongPressEnd) => session.sync_hold(),
                None => {}
            }
            session.host.needs_render = true;
        }
        _ => {}
    }

    InputResult::Continue
}
