//! Terminal story host
//!
//! A host collaborator for the playback core: it renders the observed
//! state with ANSI escapes, turns keyboard and mouse input into player
//! events, and stands in for the media layer with simulated loads.
//!
//! # Architecture
//!
//! - `host`: terminal-side state (size, overlays, press tracking)
//! - `session`: player + deck + media wiring, free of terminal I/O
//! - `media`: simulated media loads
//! - `input/`: keyboard and mouse handling
//! - `render/`: indicator row, header, body, footer, status bar, help
//!
//! # Usage
//!
//! ```no_run
//! use story_player::config::Config;
//! use story_player::deck::Deck;
//! use story_player::story::StoryFile;
//! use story_player::term::{play_deck, PlaybackResult};
//!
//! let file = StoryFile::load("stories.json").unwrap();
//! let deck = Deck::new(file.into_sequences()).unwrap();
//! match play_deck(deck, &Config::default()).unwrap() {
//!     PlaybackResult::Finished => println!("All stories watched"),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//!     PlaybackResult::Aborted(reason) => eprintln!("{}", reason),
//! }
//! ```

pub mod host;
pub(crate) mod input;
pub mod media;
pub mod render;
pub mod session;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;

use crate::config::Config;
use crate::deck::Deck;
use host::InputResult;
use session::{Flow, Session};

/// How a playback run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Every user's stories were played
    Finished,
    /// The viewer quit
    Interrupted,
    /// Playback stopped on an error the config says not to skip
    Aborted(String),
}

/// Raw mode + alternate screen for the lifetime of the guard.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Play a deck of users' stories in the terminal until it finishes or the
/// viewer quits.
pub fn play_deck(deck: Deck, config: &Config) -> Result<PlaybackResult> {
    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let mut session = Session::new(deck, config, cols, rows)?;
    let tick = config.terminal.tick();

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let pinned = session.player.on_layout(rows as u32);
    session.host.handle_resize(cols, rows, pinned);

    let mut flow = session.start(Instant::now())?;

    loop {
        match &flow {
            Flow::Continue => {}
            Flow::Finished => {
                info!("deck finished");
                return Ok(PlaybackResult::Finished);
            }
            Flow::Aborted(reason) => return Ok(PlaybackResult::Aborted(reason.clone())),
        }

        if session.host.needs_render {
            render::render_frame(&mut stdout, &session)?;
            session.host.needs_render = false;
        }

        if event::poll(tick)? {
            let ev = event::read()?;
            let now = Instant::now();
            let result = input::handle_event(ev, &mut session, now);
            if result == InputResult::Quit {
                stdout.flush()?;
                return Ok(PlaybackResult::Interrupted);
            }
            flow = session.handle_input(result, now)?;
            if flow != Flow::Continue {
                continue;
            }
        }

        flow = session.advance(Instant::now())?;
        // Progress moves every tick while playing
        session.host.needs_render = true;
    }
}
