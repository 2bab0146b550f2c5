//! gridcalc_engine - Sparse cell store + sandboxed arithmetic formulas.

pub mod engine;
