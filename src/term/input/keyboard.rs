//! Keyboard input handling for the terminal host.
//!
//! Arrow keys navigate, space holds playback (terminals report no key
//! release, so it toggles), and `k` opens a reply line that behaves like a
//! text-input overlay: playback pauses while it is up.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::term::host::InputResult;
use crate::term::session::Session;

/// Handle a keyboard event.
pub fn handle_key_event(key: KeyEvent, session: &mut Session) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    // If help is showing, any key closes it
    if session.host.show_help {
        session.host.toggle_help();
        return InputResult::Continue;
    }

    if session.host.keyboard_visible {
        handle_reply_key(key, session);
        return InputResult::Continue;
    }

    session.host.needs_render = true;
    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,

        // === Help ===
        KeyCode::Char('?') => {
            session.host.toggle_help();
            InputResult::Continue
        }

        // === Item navigation ===
        KeyCode::Right | KeyCode::Char('l') => {
            let events = session.player.next();
            session.push(events);
            InputResult::Continue
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let events = session.player.previous();
            session.push(events);
            InputResult::Continue
        }

        // === User navigation ===
        KeyCode::Down | KeyCode::Char('n') => InputResult::NextUser,
        KeyCode::Up | KeyCode::Char('b') => InputResult::PreviousUser,
        KeyCode::Char('r') => InputResult::Restart,

        // === Pause sources ===
        KeyCode::Char(' ') => {
            session.host.holding = !session.host.holding;
            session.sync_hold();
            InputResult::Continue
        }
        KeyCode::Char('p') => {
            session.host.caller_paused = !session.host.caller_paused;
            let events = session.player.set_caller_pause(session.host.caller_paused);
            session.push(events);
            InputResult::Continue
        }
        KeyCode::Char('k') => {
            set_keyboard_visible(session, true);
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}

/// Keys typed into the reply line.
fn handle_reply_key(key: KeyEvent, session: &mut Session) {
    match key.code {
        KeyCode::Enter => {
            if let Some(text) = session.host.send_reply() {
                session.record_reply(text);
            }
            set_keyboard_visible(session, false);
        }
        KeyCode::Esc => {
            session.host.reply.clear();
            set_keyboard_visible(session, false);
        }
        KeyCode::Backspace => {
            session.host.reply.pop();
        }
        KeyCode::Char(c) => {
            session.host.reply.push(c);
        }
        _ => {}
    }
    session.host.needs_render = true;
}

fn set_keyboard_visible(session: &mut Session, visible: bool) {
    session.host.keyboard_visible = visible;
    let events = session.player.on_keyboard_visibility_change(visible);
    session.push(events);
    // Layout was frozen while typing; take the current height again
    if !visible {
        let rows = session.host.term_rows;
        let pinned = session.player.on_layout(rows as u32);
        let cols = session.host.term_cols;
        session.host.handle_resize(cols, rows, pinned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::deck::Deck;
    use crate::player::Phase;
    use crate::story::{Item, Sequence};
    use std::sync::Arc;
    use std::time::Instant;

    fn session() -> Session {
        let users = vec![
            Arc::new(Sequence::new("a", vec![Item::image("1"), Item::image("2")])),
            Arc::new(Sequence::new("b", vec![Item::image("3")])),
        ];
        let mut config = Config::default();
        config.terminal.load_delay_ms = 0;
        let mut session = Session::new(Deck::new(users).unwrap(), &config, 80, 24).unwrap();
        let now = Instant::now();
        session.start(now).unwrap();
        session.advance(now).unwrap();
        session
    }

    fn press(session: &mut Session, code: KeyCode) -> InputResult {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), session)
    }

    #[test]
    fn quit_keys() {
        let mut s = session();
        assert_eq!(press(&mut s, KeyCode::Char('q')), InputResult::Quit);
        assert_eq!(press(&mut s, KeyCode::Esc), InputResult::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut s),
            InputResult::Quit
        );
    }

    #[test]
    fn arrows_navigate_items() {
        let mut s = session();
        press(&mut s, KeyCode::Right);
        assert_eq!(s.player.state().current_index, 1);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.player.state().current_index, 0);
    }

    #[test]
    fn user_keys_return_results() {
        let mut s = session();
        assert_eq!(press(&mut s, KeyCode::Char('n')), InputResult::NextUser);
        assert_eq!(press(&mut s, KeyCode::Up), InputResult::PreviousUser);
        assert_eq!(press(&mut s, KeyCode::Char('r')), InputResult::Restart);
    }

    #[test]
    fn space_toggles_hold() {
        let mut s = session();
        press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.player.phase(), Phase::Paused);
        press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.player.phase(), Phase::Playing);
    }

    #[test]
    fn reply_overlay_holds_pause_past_release() {
        let mut s = session();
        press(&mut s, KeyCode::Char(' '));
        press(&mut s, KeyCode::Char('k'));
        assert!(s.host.keyboard_visible);

        // Keys now go to the reply line, not to the hold toggle
        press(&mut s, KeyCode::Char(' '));
        press(&mut s, KeyCode::Char('h'));
        press(&mut s, KeyCode::Char('i'));
        assert_eq!(s.host.reply, " hi");
        assert_eq!(s.player.state().current_index, 0);

        press(&mut s, KeyCode::Enter);
        assert!(!s.host.keyboard_visible);
        assert_eq!(s.replies().len(), 1);
        assert_eq!(s.replies()[0].1, "hi");

        // Space hold is still active
        assert_eq!(s.player.phase(), Phase::Paused);
        press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.player.phase(), Phase::Playing);
    }

    #[test]
    fn escape_closes_reply_without_sending() {
        let mut s = session();
        press(&mut s, KeyCode::Char('k'));
        press(&mut s, KeyCode::Char('x'));
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Char('y'));
        press(&mut s, KeyCode::Esc);

        assert!(!s.host.keyboard_visible);
        assert!(s.host.reply.is_empty());
        assert!(s.replies().is_empty());
        assert!(!s.player.state().paused);
    }

    #[test]
    fn caller_pause_toggle() {
        let mut s = session();
        press(&mut s, KeyCode::Char('p'));
        assert!(s.player.state().paused);
        assert!(s.player.caller_pause());
        press(&mut s, KeyCode::Char('p'));
        assert!(!s.player.state().paused);
    }

    #[test]
    fn help_swallows_next_key() {
        let mut s = session();
        press(&mut s, KeyCode::Char('?'));
        assert!(s.host.show_help);
        assert_eq!(press(&mut s, KeyCode::Char('q')), InputResult::Continue);
        assert!(!s.host.show_help);
    }
}
