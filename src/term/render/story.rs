//! Story content rendering: header, item body and footer.
//!
//! Header and footer are overlay chrome: they stay hidden while the item is
//! loading (opacity 0) and appear once the media reports ready.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::story::{Item, MediaKind, Sequence};
use crate::term::render::progress::format_seconds;
use crate::term::render::status::truncate_to_width;

/// Header text: user name and item position.
pub fn build_header_text(sequence: &Sequence, index: usize) -> String {
    format!(" {}  ·  {}/{}", sequence.display_name(), index + 1, sequence.len())
}

/// Body lines describing the current item.
pub fn build_body_lines(item: &Item, duration: std::time::Duration, loaded: bool) -> Vec<String> {
    let icon = match item.kind {
        MediaKind::Image => "▣",
        MediaKind::Video => "▶",
    };
    let mut lines = vec![
        format!("{} {}", icon, item.kind.label()),
        item.url.clone(),
        format_seconds(duration),
    ];
    if !loaded {
        lines.push("loading…".to_string());
    }
    lines
}

/// Render a line of text at `row`, padded to `width`.
fn render_line<W: Write>(out: &mut W, width: u16, row: u16, color: &str, text: &str) -> Result<()> {
    let text = truncate_to_width(text, width as usize);
    let padding = (width as usize).saturating_sub(text.width());
    write!(
        out,
        "\x1b[{};1H{}{}{}\x1b[0m",
        row + 1,
        color,
        text,
        " ".repeat(padding)
    )?;
    Ok(())
}

/// Render the header row, or a blank row while the chrome is faded out.
pub fn render_header<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    sequence: &Sequence,
    index: usize,
    opacity: f32,
) -> Result<()> {
    if opacity <= 0.0 {
        return render_line(out, width, row, "", "");
    }
    render_line(out, width, row, "\x1b[1;97m", &build_header_text(sequence, index))
}

/// Render the item body centered in `height` rows starting at `top`.
pub fn render_body<W: Write>(
    out: &mut W,
    width: u16,
    top: u16,
    height: u16,
    lines: &[String],
) -> Result<()> {
    let first = top + height.saturating_sub(lines.len() as u16) / 2;
    for row in top..top + height {
        let text = row
            .checked_sub(first)
            .and_then(|i| lines.get(i as usize))
            .map(String::as_str)
            .unwrap_or("");
        let pad = (width as usize).saturating_sub(text.width()) / 2;
        let centered = format!("{}{}", " ".repeat(pad), text);
        render_line(out, width, row, "\x1b[37m", &centered)?;
    }
    Ok(())
}

/// Render the footer: the reply line while typing, otherwise a hint and
/// the last reply sent.
pub fn render_footer<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    reply: Option<&str>,
    last_reply: Option<&str>,
    opacity: f32,
) -> Result<()> {
    if let Some(reply) = reply {
        return render_line(out, width, row, "\x1b[97m", &format!(" reply> {}▏", reply));
    }
    if opacity <= 0.0 {
        return render_line(out, width, row, "", "");
    }
    let text = match last_reply {
        Some(last) => format!(" k: reply   (sent: {})", last),
        None => " k: reply".to_string(),
    };
    render_line(out, width, row, "\x1b[90m", &text)
}
