//! CLI Exit Code Registry
//!
//! Single source of truth for all `pdiff` exit codes. Exit codes are part
//! of the shell contract — scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Description                                           |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 1    | General error (unspecified)                           |
//! | 2    | CLI usage error (bad args, unreadable file)           |
//! | 3    | Required column(s) missing from an input table        |
//! | 4    | Empty alignment: no coordinate keys shared            |
//! | 5    | Duplicate coordinate keys within one table            |
//! | 6    | Parse error (CSV syntax, numeric cell, TOML syntax)   |
//! | 7    | Config validation error                               |

use patterndiff_engine::CompareError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable input file.
pub const EXIT_USAGE: u8 = 2;

/// One or both input tables lack a required column.
pub const EXIT_MISSING_FIELDS: u8 = 3;

/// The join produced zero rows (likely a coordinate-range mismatch).
pub const EXIT_EMPTY_ALIGNMENT: u8 = 4;

/// A coordinate key appears more than once within one input table.
pub const EXIT_DUPLICATE_KEYS: u8 = 5;

/// CSV syntax, numeric cell, or TOML syntax error.
pub const EXIT_PARSE: u8 = 6;

/// Config parsed but failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 7;

/// Map an engine error to its exit code.
pub fn engine_exit_code(err: &CompareError) -> u8 {
    match err {
        CompareError::ConfigParse(_) => EXIT_PARSE,
        CompareError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        CompareError::CsvParse { .. } => EXIT_PARSE,
        CompareError::MissingFields { .. } => EXIT_MISSING_FIELDS,
        CompareError::ValueParse { .. } => EXIT_PARSE,
        CompareError::DuplicateKeys { .. } => EXIT_DUPLICATE_KEYS,
        CompareError::EmptyAlignment { .. } => EXIT_EMPTY_ALIGNMENT,
    }
}
