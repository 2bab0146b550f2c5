//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::engine::CellRef;

/// Errors that can occur in the Gridcalc document layer.
///
/// Formula failures are not errors here; they display as `#ERROR`.
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        cell: CellRef,
        rows: usize,
        cols: usize,
    },

    #[error("Window of {cells} cells exceeds the limit of {limit}")]
    WindowTooLarge { cells: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
