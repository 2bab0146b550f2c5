//! Formula evaluation and the display boundary.
//!
//! A raw cell value is a formula when it starts with `=`. The rest of the
//! text goes through reference substitution, then the arithmetic parser.
//! [`display_value`] is the only entry point a display layer needs: it never
//! fails, and a formula that cannot be evaluated shows `#ERROR`.

use super::cell::CellSource;
use super::cell_ref::ColumnDecoding;
use super::error::EvalError;
use super::expr::evaluate_expression;
use super::format::{ERROR_SENTINEL, format_number};
use super::preprocess::substitute_references;

/// True when the raw value is a formula (first character is `=`).
pub fn is_formula(raw: &str) -> bool {
    raw.starts_with('=')
}

/// Evaluate a formula body (the text after `=`) against `source`.
pub fn evaluate_formula<S: CellSource + ?Sized>(
    body: &str,
    source: &S,
    decoding: ColumnDecoding,
) -> Result<f64, EvalError> {
    let expression = substitute_references(body, source, decoding)?;
    evaluate_expression(&expression)
}

/// Text to show for a raw cell value.
///
/// Literals are returned unchanged. Formulas yield their formatted result,
/// or [`ERROR_SENTINEL`] if anything goes wrong.
pub fn display_value<S: CellSource + ?Sized>(
    raw: &str,
    source: &S,
    decoding: ColumnDecoding,
) -> String {
    let Some(body) = raw.strip_prefix('=') else {
        return raw.to_string();
    };
    match evaluate_formula(body, source, decoding) {
        Ok(n) => format_number(n),
        Err(e) => {
            log::debug!("formula {:?} failed: {}", raw, e);
            ERROR_SENTINEL.to_string()
        }
    }
}
