//! Spreadsheet engine API.
//!
//! This module provides the computation core for the spreadsheet:
//!
//! - [`Grid`], [`CellSource`] - Sparse storage of raw cell text
//! - [`CellRef`], [`ColumnDecoding`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`scan_references`], [`extract_references`] - Find references in formula text
//! - [`substitute_references`] - Replace references with referenced raw values
//! - [`parse_expression`], [`evaluate_expression`] - Sandboxed arithmetic
//! - [`display_value`] - Literal passthrough or formula result / `#ERROR`
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod error;
mod eval;
mod expr;
mod format;
mod preprocess;
mod refs;

pub use cell::{CellSource, Grid};
pub use cell_ref::{CellRef, ColumnDecoding};
pub use error::EvalError;
pub use eval::{display_value, evaluate_formula, is_formula};
pub use expr::{BinaryOp, Expr, MAX_NESTING_DEPTH, evaluate_expression, parse_expression};
pub use format::{ERROR_SENTINEL, format_number};
pub use preprocess::substitute_references;
pub use refs::{ReferenceToken, extract_references, scan_references};
