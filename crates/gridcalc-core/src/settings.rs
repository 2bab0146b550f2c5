//! Document settings.

use gridcalc_engine::engine::{CellRef, ColumnDecoding};

/// Rows and columns shown by a display layer.
pub const DEFAULT_GRID_SIZE: usize = 10_000;

/// Size of the visible grid. The cell store itself is unbounded; only views
/// are checked against the extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
}

impl Extent {
    pub fn new(rows: usize, cols: usize) -> Extent {
        Extent { rows, cols }
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

impl Default for Extent {
    fn default() -> Self {
        Extent::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

/// Per-document behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub extent: Extent,
    /// Used both for references inside formulas and for addresses typed by
    /// the user, so `=AA1` and `write_cell_at("AA1", ..)` agree.
    pub column_decoding: ColumnDecoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extent() {
        let extent = Extent::default();
        assert_eq!(extent, Extent::new(10_000, 10_000));
        assert!(extent.contains(&CellRef::new(9_999, 9_999)));
        assert!(!extent.contains(&CellRef::new(10_000, 0)));
        assert!(!extent.contains(&CellRef::new(0, 10_000)));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.column_decoding, ColumnDecoding::Bijective);
    }
}
