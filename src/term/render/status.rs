//! Status bar rendering for the terminal host.
//!
//! Displays the playback phase, active pause sources, item timing and the
//! main shortcuts.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::player::{Phase, PauseSource};
use crate::term::render::progress::format_seconds;

/// What the status bar shows.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub phase: Phase,
    pub sources: Vec<PauseSource>,
    pub elapsed: Duration,
    pub duration: Duration,
    /// 1-based user position and deck size
    pub user: (usize, usize),
}

/// Short label for the phase.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Playing => "playing",
        Phase::Paused => "paused",
        Phase::Completed => "done",
    }
}

/// Build the visible text of the status bar (no colors).
pub fn build_status_text(status: &StatusLine) -> String {
    let icon = match status.phase {
        Phase::Playing => "▶",
        Phase::Paused => "⏸",
        Phase::Loading => "…",
        Phase::Idle | Phase::Completed => "■",
    };

    let mut text = format!(" {} {}", icon, phase_label(status.phase));

    if !status.sources.is_empty() {
        let sources: Vec<String> = status.sources.iter().map(|s| s.to_string()).collect();
        text.push_str(&format!(" [{}]", sources.join(",")));
    }

    text.push_str(&format!(
        "  {}/{}  user {}/{}",
        format_seconds(status.elapsed),
        format_seconds(status.duration),
        status.user.0,
        status.user.1,
    ));

    text.push_str("  │ space:hold k:reply ?:hlp q:quit");
    text
}

/// Render the status bar.
///
/// # Arguments
/// * `out` - Writer to render into
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `status` - What to show
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    status: &StatusLine,
) -> Result<()> {
    const GREY: &str = "\x1b[37m";
    const RESET: &str = "\x1b[0m";

    let text = truncate_to_width(&build_status_text(status), width as usize);
    let visible_len = text.width();

    let mut output = String::with_capacity(text.len() + width as usize + 16);
    output.push_str(&format!("\x1b[{};1H\x1b[48;5;236m", row + 1));
    output.push_str(GREY);
    output.push_str(&text);

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    for _ in 0..padding {
        output.push(' ');
    }

    output.push_str(RESET);
    write!(out, "{}", output)?;
    Ok(())
}

/// Cut `text` to at most `max` display columns.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
