//! Rendering components for the terminal host.
//!
//! Draws the observed player state: indicator row, header, item body,
//! footer, status bar and the help overlay.

mod help;
mod progress;
mod status;
mod story;

pub use help::{calc_help_start_col, calc_help_start_row, help_lines, render_help, CONTROLS, HELP_BOX_WIDTH};
pub use progress::{build_indicator_cells, format_seconds, render_indicator_row, segment_widths, Cell};
pub use status::{build_status_text, phase_label, render_status_bar, truncate_to_width, StatusLine};
pub use story::{build_body_lines, build_header_text, render_body, render_footer, render_header};

use std::io::Write;

use anyhow::Result;

use crate::term::session::Session;

/// Rows taken by chrome: indicators, header, footer, status bar.
pub const CHROME_ROWS: u16 = 4;

/// Render a full frame of the session.
pub fn render_frame<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    let host = &session.host;
    let width = host.term_cols;
    let rows = host.visible_rows();

    if host.show_help {
        render_help(out, width, host.term_rows)?;
        out.flush()?;
        return Ok(());
    }

    let state = session.player.state();
    let status = StatusLine {
        phase: state.phase,
        sources: session.player.gate().active_sources().collect(),
        elapsed: state.elapsed(),
        duration: state.duration,
        user: (session.deck.position() + 1, session.deck.len()),
    };

    if rows <= CHROME_ROWS {
        render_status_bar(out, width, rows.saturating_sub(1), &status)?;
        out.flush()?;
        return Ok(());
    }

    render_indicator_row(out, width, 0, &session.player.indicators(), state.opacity <= 0.0)?;

    if let (Some(sequence), Some(item)) = (session.player.sequence(), session.player.current_item()) {
        render_header(out, width, 1, sequence, state.current_index, state.opacity)?;
        let lines = build_body_lines(item, state.duration, state.loaded);
        render_body(out, width, 2, rows - CHROME_ROWS, &lines)?;
    } else {
        // Nothing on screen: blank header and body
        render_body(out, width, 1, rows - CHROME_ROWS + 1, &[])?;
    }

    let reply = host.keyboard_visible.then_some(host.reply.as_str());
    render_footer(
        out,
        width,
        rows - 2,
        reply,
        host.last_reply.as_deref(),
        state.opacity,
    )?;
    render_status_bar(out, width, rows - 1, &status)?;

    out.flush()?;
    Ok(())
}
