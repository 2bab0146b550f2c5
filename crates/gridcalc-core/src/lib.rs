//! gridcalc-core - UI-agnostic document model + grid views.

pub mod document;
pub mod error;
pub mod settings;
pub mod view;

pub use document::Document;
pub use error::{GridcalcError, Result};
pub use settings::{Extent, Settings};
pub use view::{Window, column_header, render_markdown, row_header};

pub use gridcalc_engine::engine::{CellRef, ColumnDecoding, ERROR_SENTINEL};
