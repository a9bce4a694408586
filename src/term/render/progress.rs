//! Progress indicator row.
//!
//! One segment per item in the current sequence, separated by a one-column
//! gap: watched items are full, the current one fills with its progress,
//! upcoming ones are empty.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

/// Columns between two segments.
pub const SEGMENT_GAP: usize = 1;

/// One column of the indicator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Filled,
    Empty,
    Gap,
}

/// Format a duration as seconds with one decimal ("2.5s").
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

/// Split `width` columns into `count` segments with gaps between them.
///
/// Leftover columns go to the leading segments. Returns an empty list if
/// the row is too narrow to give every segment at least one column.
pub fn segment_widths(width: usize, count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = SEGMENT_GAP * (count - 1);
    let usable = width.saturating_sub(gaps);
    if usable < count {
        return Vec::new();
    }
    let base = usable / count;
    let extra = usable % count;
    (0..count)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Build the cells of the indicator row.
///
/// # Arguments
/// * `width` - Width of the row in columns
/// * `values` - Progress of each indicator in [0, 1]
pub fn build_indicator_cells(width: usize, values: &[f64]) -> Vec<Cell> {
    let widths = segment_widths(width, values.len());
    let mut cells = Vec::with_capacity(width);

    for (i, (&seg_width, &value)) in widths.iter().zip(values).enumerate() {
        if i > 0 {
            cells.extend(std::iter::repeat(Cell::Gap).take(SEGMENT_GAP));
        }
        let filled = ((seg_width as f64) * value.clamp(0.0, 1.0)).round() as usize;
        cells.extend(std::iter::repeat(Cell::Filled).take(filled));
        cells.extend(std::iter::repeat(Cell::Empty).take(seg_width - filled));
    }

    cells
}

/// Render the indicator row.
///
/// # Arguments
/// * `out` - Writer to render into
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `values` - Progress of each indicator
/// * `dim` - Draw faded (chrome not yet faded in)
pub fn render_indicator_row<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    values: &[f64],
    dim: bool,
) -> Result<()> {
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const BLACK_GREY: &str = "\x1b[38;5;236m";

    let cells = build_indicator_cells(width as usize, values);

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    let (filled_color, empty_color) = if dim {
        (DARK_GREY, BLACK_GREY)
    } else {
        (WHITE, DARK_GREY)
    };

    let mut current: Option<Cell> = None;
    for cell in &cells {
        if current != Some(*cell) {
            match cell {
                Cell::Filled => output.push_str(filled_color),
                Cell::Empty => output.push_str(empty_color),
                Cell::Gap => {}
            }
            current = Some(*cell);
        }
        output.push(match cell {
            Cell::Filled => '━',
            Cell::Empty => '─',
            Cell::Gap => ' ',
        });
    }

    for _ in cells.len()..width as usize {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}
