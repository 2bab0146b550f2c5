//! Error types for the Gridcalc command line

use thiserror::Error;

/// Errors in how the command line was used
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Expected <REF>=<VALUE>, got: {0}")]
    InvalidAssignment(String),
}
