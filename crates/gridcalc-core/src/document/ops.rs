use super::Document;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::{CellRef, display_value, extract_references, is_formula};

impl Document {
    /// Raw text stored at `cell` ("" when unset).
    pub fn raw_value(&self, cell: &CellRef) -> String {
        self.grid.get(cell)
    }

    /// Store user-entered text verbatim. Never fails.
    pub fn write_cell(&mut self, cell: CellRef, raw: &str) {
        log::trace!("write {} = {:?}", cell, raw);
        self.grid.set(cell, raw);
    }

    /// What a display layer shows for `cell`: the literal text, the formatted
    /// result of a formula, or `#ERROR`. Never fails.
    pub fn read_display_value(&self, cell: &CellRef) -> String {
        let raw = self.grid.get(cell);
        display_value(&raw, &self.grid, self.settings.column_decoding)
    }

    /// Parse an A1-style address with this document's column decoding.
    pub fn parse_address(&self, name: &str) -> Result<CellRef> {
        CellRef::parse_with(name, self.settings.column_decoding)
            .ok_or_else(|| GridcalcError::InvalidCellRef(name.to_string()))
    }

    /// Write by address, e.g. `write_cell_at("B3", "=A1*2")`.
    pub fn write_cell_at(&mut self, name: &str, raw: &str) -> Result<CellRef> {
        let cell = self.parse_address(name)?;
        self.write_cell(cell, raw);
        Ok(cell)
    }

    /// Read a display value by address.
    pub fn read_display_value_at(&self, name: &str) -> Result<String> {
        let cell = self.parse_address(name)?;
        Ok(self.read_display_value(&cell))
    }

    /// Evaluate a formula that is not stored in any cell.
    /// The leading `=` is optional.
    pub fn evaluate(&self, input: &str) -> String {
        let input = input.trim();
        let formula = if is_formula(input) {
            input.to_string()
        } else {
            format!("={}", input)
        };
        display_value(&formula, &self.grid, self.settings.column_decoding)
    }

    /// Cells read by the formula at `cell`, in order of appearance.
    /// Literal cells read nothing.
    pub fn precedents(&self, cell: &CellRef) -> Vec<CellRef> {
        let raw = self.grid.get(cell);
        match raw.strip_prefix('=') {
            Some(body) => extract_references(body, self.settings.column_decoding),
            None => Vec::new(),
        }
    }
}
