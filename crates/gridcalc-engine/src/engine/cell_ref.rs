//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! Column labels are encoded bijectively (A..Z, AA..AZ, BA..). Decoding comes
//! in two flavours, see [`ColumnDecoding`].
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// How a run of column letters is turned back into a column index.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDecoding {
    /// `acc * 26 + (letter + 1)`, minus one at the end. Inverse of
    /// [`CellRef::col_to_letters`] for every label.
    #[default]
    Bijective,
    /// `acc * 26 + letter` with A = 0. Agrees with `Bijective` on single
    /// letters only: `AA` decodes to 0 and `BA` to 26.
    Legacy,
}

impl ColumnDecoding {
    /// Decode a run of ASCII letters into a 0-based column index.
    /// Returns None on an empty run, a non-letter, or overflow.
    pub fn decode(self, letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for c in letters.bytes() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            let letter = (c.to_ascii_uppercase() - b'A') as usize;
            let digit = match self {
                ColumnDecoding::Bijective => letter + 1,
                ColumnDecoding::Legacy => letter,
            };
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        match self {
            ColumnDecoding::Bijective => acc.checked_sub(1),
            ColumnDecoding::Legacy => Some(acc),
        }
    }
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "b2", "AA10")
    /// using the given column decoding. Letters are case-insensitive.
    /// Returns None if the input is invalid, the row number is 0, or either
    /// index overflows.
    pub fn parse_with(name: &str, decoding: ColumnDecoding) -> Option<CellRef> {
        let caps = a1_re().captures(name.trim())?;
        Self::from_parts(&caps["letters"], &caps["numbers"], decoding)
    }

    /// Build a reference from an already split letter run and 1-based row digits.
    pub fn from_parts(letters: &str, digits: &str, decoding: ColumnDecoding) -> Option<CellRef> {
        let col = decoding.decode(letters)?;
        let row = digits.parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = Vec::new();
        // Widened so that `col + 1` cannot overflow at usize::MAX.
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("A1 regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, ColumnDecoding::Bijective)
            .ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row as u128 + 1)
    }
}
