//! Grid views: header labels, rectangular windows of display values, and
//! Markdown rendering of a window.

use crate::document::Document;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::{CellRef, ColumnDecoding};

/// Upper bound on cells materialized by a single window read.
pub const MAX_WINDOW_CELLS: usize = 1_000_000;

/// Column header label (0 -> A, 26 -> AA).
pub fn column_header(col: usize) -> String {
    CellRef::col_to_letters(col)
}

/// Row header label, 1-based.
pub fn row_header(row: usize) -> String {
    (row as u128 + 1).to_string()
}

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    top_left: CellRef,
    bottom_right: CellRef,
}

impl Window {
    /// Window spanning two corners given in any order.
    pub fn new(a: CellRef, b: CellRef) -> Window {
        Window {
            top_left: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `A1:C3`, or a single cell `B2`.
    pub fn parse(range: &str, decoding: ColumnDecoding) -> Result<Window> {
        let corner = |name: &str| {
            CellRef::parse_with(name, decoding)
                .ok_or_else(|| GridcalcError::InvalidRange(range.to_string()))
        };
        match range.split_once(':') {
            Some((start, end)) => Ok(Window::new(corner(start)?, corner(end)?)),
            None => {
                let cell = corner(range)?;
                Ok(Window::new(cell, cell))
            }
        }
    }

    /// Smallest window covering every populated cell, or None if the
    /// document is empty.
    pub fn used(doc: &Document) -> Option<Window> {
        doc.grid
            .bounds()
            .map(|(top_left, bottom_right)| Window::new(top_left, bottom_right))
    }

    pub fn top_left(&self) -> CellRef {
        self.top_left
    }

    pub fn bottom_right(&self) -> CellRef {
        self.bottom_right
    }

    pub fn rows(&self) -> usize {
        self.bottom_right.row.abs_diff(self.top_left.row).saturating_add(1)
    }

    pub fn cols(&self) -> usize {
        self.bottom_right.col.abs_diff(self.top_left.col).saturating_add(1)
    }
}

impl Document {
    /// Display values of every cell in `window`, row-major.
    pub fn display_window(&self, window: &Window) -> Result<Vec<Vec<String>>> {
        let extent = self.settings.extent;
        for corner in [window.top_left, window.bottom_right] {
            if !extent.contains(&corner) {
                return Err(GridcalcError::OutOfBounds {
                    cell: corner,
                    rows: extent.rows,
                    cols: extent.cols,
                });
            }
        }

        let cells = window.rows().saturating_mul(window.cols());
        if cells > MAX_WINDOW_CELLS {
            return Err(GridcalcError::WindowTooLarge {
                cells,
                limit: MAX_WINDOW_CELLS,
            });
        }

        let rows = (window.top_left.row..=window.bottom_right.row)
            .map(|row| {
                (window.top_left.col..=window.bottom_right.col)
                    .map(|col| self.read_display_value(&CellRef::new(row, col)))
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

/// Render `window` (or the used range when None) as a Markdown table with
/// column letters across the top and 1-based row numbers down the side.
pub fn render_markdown(doc: &Document, window: Option<&Window>) -> Result<String> {
    let mut out = String::new();
    out.push_str("# Sheet\n\n");

    let Some(window) = window.copied().or_else(|| Window::used(doc)) else {
        out.push_str("*Empty spreadsheet*\n");
        return Ok(out);
    };
    let values = doc.display_window(&window)?;

    out.push_str("|   |");
    for col in window.top_left.col..=window.bottom_right.col {
        out.push_str(&format!(" {} |", column_header(col)));
    }
    out.push_str("\n|---|");
    for _ in 0..window.cols() {
        out.push_str("---|");
    }
    out.push('\n');

    for (offset, row_values) in values.iter().enumerate() {
        out.push_str(&format!("| {} |", row_header(window.top_left.row + offset)));
        for value in row_values {
            out.push_str(&format!(" {} |", escape_markdown(value)));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
