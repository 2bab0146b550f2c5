//! Sparse cell storage.
//!
//! - [`Grid`] - sparse map from [`CellRef`] to the raw text a user entered
//! - [`CellSource`] - read-only view used by formula evaluation
//!
//! Cells have no type of their own. Whether a cell is a formula is decided
//! lexically from its raw text when it is displayed.

use dashmap::DashMap;
use std::collections::HashMap;

use super::cell_ref::CellRef;

/// Anything formulas can read raw cell text from.
pub trait CellSource {
    /// Raw text stored at `cell`, or the empty string when nothing is stored.
    fn raw_value(&self, cell: &CellRef) -> String;
}

/// Sparse grid storage keyed by coordinate.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: DashMap<CellRef, String>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Raw value at `cell`; absent cells read as "".
    pub fn get(&self, cell: &CellRef) -> String {
        self.cells
            .get(cell)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Store `value` at `cell`, replacing whatever was there.
    ///
    /// An empty value drops the entry; reads are unaffected since absent
    /// cells already read as "".
    pub fn set(&self, cell: CellRef, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value);
        }
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest rectangle (top-left, bottom-right) covering every populated
    /// cell, or None for an empty grid.
    pub fn bounds(&self) -> Option<(CellRef, CellRef)> {
        let mut iter = self.cells.iter();
        let first = *iter.next()?.key();
        let (mut min, mut max) = (first, first);
        for entry in iter {
            let cell = entry.key();
            min.row = min.row.min(cell.row);
            min.col = min.col.min(cell.col);
            max.row = max.row.max(cell.row);
            max.col = max.col.max(cell.col);
        }
        Some((min, max))
    }
}

impl CellSource for Grid {
    fn raw_value(&self, cell: &CellRef) -> String {
        self.get(cell)
    }
}

impl CellSource for HashMap<CellRef, String> {
    fn raw_value(&self, cell: &CellRef) -> String {
        self.get(cell).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unset_cell_reads_empty() {
        let grid = Grid::new();
        assert_eq!(grid.get(&CellRef::new(0, 0)), "");
        assert_eq!(grid.get(&CellRef::new(usize::MAX, usize::MAX)), "");
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let grid = Grid::new();
        let a1 = CellRef::new(0, 0);
        grid.set(a1, "5");
        grid.set(a1, "=A2+1");
        assert_eq!(grid.get(&a1), "=A2+1");
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_set_empty_prunes_entry() {
        let grid = Grid::new();
        let b2 = CellRef::new(1, 1);
        grid.set(b2, "hello");
        assert_eq!(grid.len(), 1);
        grid.set(b2, "");
        assert!(grid.is_empty());
        assert_eq!(grid.get(&b2), "");
        assert_eq!(grid.bounds(), None);
    }

    #[test]
    fn test_clones_are_independent() {
        let grid = Grid::new();
        grid.set(CellRef::new(0, 0), "a");
        let copy = grid.clone();
        grid.set(CellRef::new(3, 4), "x");
        copy.set(CellRef::new(0, 0), "b");
        assert_eq!(copy.get(&CellRef::new(3, 4)), "");
        assert_eq!(grid.get(&CellRef::new(0, 0)), "a");
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.bounds(), None);
        grid.set(CellRef::new(4, 1), "x");
        grid.set(CellRef::new(2, 7), "y");
        assert_eq!(
            grid.bounds(),
            Some((CellRef::new(2, 1), CellRef::new(4, 7)))
        );
    }

    #[test]
    fn test_hashmap_source() {
        let mut cells = HashMap::new();
        cells.insert(CellRef::new(0, 0), "7".to_string());
        assert_eq!(cells.raw_value(&CellRef::new(0, 0)), "7");
        assert_eq!(cells.raw_value(&CellRef::new(0, 1)), "");
    }

    proptest! {
        #[test]
        fn written_values_read_back(row in 0usize..100_000, col in 0usize..100_000, value in ".*") {
            let grid = Grid::new();
            let cell = CellRef::new(row, col);
            grid.set(cell, value.clone());
            prop_assert_eq!(grid.get(&cell), value);
        }
    }
}
