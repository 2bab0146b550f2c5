//! Reference scanning in formula text.
//!
//! A reference token is a maximal run of uppercase letters immediately
//! followed by a run of digits (`A1`, `B12`, `AA100`). Tokens are found left
//! to right without overlapping. Lowercase letters never start a token, so
//! `a1` is left in place and later rejected by the expression parser.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

use super::cell_ref::{CellRef, ColumnDecoding};
use super::error::EvalError;

/// A reference token found in formula text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceToken<'a> {
    /// Byte range of the whole token in the scanned text.
    pub span: Range<usize>,
    pub letters: &'a str,
    pub digits: &'a str,
}

impl ReferenceToken<'_> {
    /// The token text as written, e.g. `B12`.
    pub fn text(&self) -> String {
        format!("{}{}", self.letters, self.digits)
    }

    /// Resolve to a 0-based coordinate.
    pub fn resolve(&self, decoding: ColumnDecoding) -> Result<CellRef, EvalError> {
        CellRef::from_parts(self.letters, self.digits, decoding)
            .ok_or_else(|| EvalError::MalformedReference(self.text()))
    }
}

/// Find every reference token in `formula`, in order of appearance.
pub fn scan_references(formula: &str) -> Vec<ReferenceToken<'_>> {
    reference_re()
        .captures_iter(formula)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(ReferenceToken {
                span: whole.range(),
                letters: caps.name("letters")?.as_str(),
                digits: caps.name("digits")?.as_str(),
            })
        })
        .collect()
}

/// Cells a formula reads, in order of appearance.
/// Tokens that do not resolve to a cell are skipped.
pub fn extract_references(formula: &str, decoding: ColumnDecoding) -> Vec<CellRef> {
    scan_references(formula)
        .iter()
        .filter_map(|token| token.resolve(decoding).ok())
        .collect()
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"(?<letters>[A-Z]+)(?<digits>[0-9]+)")
            .expect("reference token regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_tokens_in_order() {
        let tokens = scan_references("A1+B12*(AA100-3)");
        let texts: Vec<String> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["A1", "B12", "AA100"]);
        assert_eq!(tokens[1].span, 3..6);
        assert_eq!(tokens[1].letters, "B");
        assert_eq!(tokens[1].digits, "12");
    }

    #[test]
    fn test_scan_ignores_lowercase_and_bare_words() {
        assert!(scan_references("a1 + b2").is_empty());
        assert!(scan_references("ABC + 10").is_empty());
        assert!(scan_references("").is_empty());
    }

    #[test]
    fn test_scan_is_maximal_and_unanchored() {
        // A token may start right after a digit; letters and digits are taken greedily.
        let tokens = scan_references("2ABC34D5");
        let texts: Vec<String> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["ABC34", "D5"]);
    }

    #[test]
    fn test_resolve() {
        let tokens = scan_references("B12");
        assert_eq!(
            tokens[0].resolve(ColumnDecoding::Bijective),
            Ok(CellRef::new(11, 1))
        );
    }

    #[test]
    fn test_resolve_row_zero_is_malformed() {
        let tokens = scan_references("A0");
        assert_eq!(
            tokens[0].resolve(ColumnDecoding::Bijective),
            Err(EvalError::MalformedReference("A0".to_string()))
        );
    }

    #[test]
    fn test_resolve_overflow_is_malformed() {
        let formula = format!("{}1", "Z".repeat(30));
        let tokens = scan_references(&formula);
        assert!(matches!(
            tokens[0].resolve(ColumnDecoding::Legacy),
            Err(EvalError::MalformedReference(_))
        ));
    }

    #[test]
    fn test_extract_references() {
        let refs = extract_references("A1 + B1 + C2 + A0", ColumnDecoding::Bijective);
        assert_eq!(
            refs,
            vec![CellRef::new(0, 0), CellRef::new(0, 1), CellRef::new(1, 2)]
        );
    }

    #[test]
    fn test_extract_references_follows_decoding() {
        assert_eq!(
            extract_references("AB3", ColumnDecoding::Bijective),
            vec![CellRef::new(2, 27)]
        );
        assert_eq!(
            extract_references("AB3", ColumnDecoding::Legacy),
            vec![CellRef::new(2, 1)]
        );
    }
}
