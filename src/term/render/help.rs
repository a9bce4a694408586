//! Help overlay: a centered box listing the key and mouse controls.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

/// Control groups shown in the overlay, as `(heading, [(keys, action)])`.
pub const CONTROLS: &[(&str, &[(&str, &str)])] = &[
    (
        "Stories",
        &[
            ("click", "Left side back, right next"),
            ("hold", "Pause while held"),
            ("<-/->", "Previous / next story"),
            ("Space", "Hold / release"),
        ],
    ),
    (
        "Users",
        &[("Up/Down", "Previous / next user"), ("r", "Restart current user")],
    ),
    (
        "Overlays",
        &[
            ("k", "Type a reply (pauses)"),
            ("Enter/Esc", "Send / discard reply"),
            ("p", "Toggle caller pause"),
        ],
    ),
    ("General", &[("?", "Show this help"), ("q", "Quit player")]),
];

const TITLE: &str = "Story Player Help";
const FOOTER: &str = "Press any key to close";
const KEY_COLUMN: usize = 11;

/// Columns between the box borders.
const INNER_WIDTH: usize = 43;

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: usize = INNER_WIDTH + 2;

fn pad(text: &str) -> String {
    let fill = INNER_WIDTH.saturating_sub(text.width());
    format!("║{}{}║", text, " ".repeat(fill))
}

fn centered(text: &str) -> String {
    let left = INNER_WIDTH.saturating_sub(text.width()) / 2;
    pad(&format!("{}{}", " ".repeat(left), text))
}

/// Lines of the help box, borders included.
pub fn help_lines() -> Vec<String> {
    let rule = "═".repeat(INNER_WIDTH);
    let mut lines = vec![
        format!("╔{}╗", rule),
        centered(TITLE),
        format!("╠{}╣", rule),
    ];
    for (heading, rows) in CONTROLS {
        lines.push(pad(""));
        lines.push(pad(&format!("  {}", heading)));
        for (keys, action) in rows.iter() {
            lines.push(pad(&format!("    {:<width$}{}", keys, action, width = KEY_COLUMN)));
        }
    }
    lines.push(pad(""));
    lines.push(centered(FOOTER));
    lines.push(format!("╚{}╝", rule));
    lines
}

/// Row that vertically centers the box, 0 when it does not fit.
pub fn calc_help_start_row(term_height: u16) -> u16 {
    let box_height = help_lines().len() as u16;
    term_height.saturating_sub(box_height) / 2
}

pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Clear the screen and draw the help box.
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let start_row = calc_help_start_row(height);
    let col = calc_help_start_col(width);

    queue!(out, Clear(ClearType::All), SetForegroundColor(Color::Green))?;
    for (i, line) in help_lines().iter().enumerate() {
        queue!(out, MoveTo(col, start_row + i as u16), Print(line))?;
    }
    queue!(out, ResetColor)?;

    Ok(())
}
