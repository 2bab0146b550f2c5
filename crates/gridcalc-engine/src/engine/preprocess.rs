//! Reference substitution.
//!
//! Before a formula body can be handed to the arithmetic parser, every
//! reference token (`A1`, `B12`) is replaced by the raw text stored in the
//! referenced cell:
//!
//! - an empty cell becomes `0`
//! - any other value is pasted verbatim, including another cell's formula
//!   text (formulas are not evaluated transitively)
//!
//! The substituted text is not scanned again, so references inside pasted
//! values are left for the parser to reject.

use super::cell::CellSource;
use super::cell_ref::ColumnDecoding;
use super::error::EvalError;
use super::refs::scan_references;

/// Replace every reference in `body` with the referenced raw value.
pub fn substitute_references<S: CellSource + ?Sized>(
    body: &str,
    source: &S,
    decoding: ColumnDecoding,
) -> Result<String, EvalError> {
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for token in scan_references(body) {
        let cell = token.resolve(decoding)?;
        let value = source.raw_value(&cell);

        out.push_str(&body[last..token.span.start]);
        if value.is_empty() {
            out.push('0');
        } else {
            out.push_str(&value);
        }
        last = token.span.end;
    }
    out.push_str(&body[last..]);

    log::trace!("substituted {:?} -> {:?}", body, out);
    Ok(out)
}
