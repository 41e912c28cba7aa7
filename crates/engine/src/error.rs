use std::fmt;

use crate::model::TableId;

/// A coordinate key that appears more than once within one input table.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateKey {
    pub coord_a: f64,
    pub coord_b: f64,
    pub count: usize,
}

#[derive(Debug)]
pub enum CompareError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty field name, repeated column, etc.).
    ConfigValidation(String),
    /// CSV syntax error while reading a table.
    CsvParse { table: TableId, message: String },
    /// An input table lacks one or more required columns.
    MissingFields { table: TableId, fields: Vec<String> },
    /// A cell that should hold a number does not parse as one.
    ValueParse {
        table: TableId,
        line: usize,
        column: String,
        value: String,
    },
    /// Coordinate keys appearing more than once within a single table.
    /// Joining such a table would silently multiply rows, so it is rejected.
    DuplicateKeys {
        table: TableId,
        duplicates: Vec<DuplicateKey>,
    },
    /// The join produced zero rows: the two tables share no coordinate key.
    EmptyAlignment {
        reference_rows: usize,
        reconstruction_rows: usize,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::CsvParse { table, message } => {
                write!(f, "{table} table: CSV parse error: {message}")
            }
            Self::MissingFields { table, fields } => {
                write!(
                    f,
                    "{table} table: missing required column(s): {}",
                    fields
                        .iter()
                        .map(|c| format!("'{c}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Self::ValueParse {
                table,
                line,
                column,
                value,
            } => {
                write!(
                    f,
                    "{table} table, line {line}: cannot parse '{column}' value {value:?} as a number"
                )
            }
            Self::DuplicateKeys { table, duplicates } => {
                writeln!(f, "{table} table: duplicate coordinate keys found:")?;
                for dup in duplicates {
                    writeln!(
                        f,
                        "  ({}, {}) appears {} times",
                        dup.coord_a, dup.coord_b, dup.count
                    )?;
                }
                Ok(())
            }
            Self::EmptyAlignment {
                reference_rows,
                reconstruction_rows,
            } => {
                write!(
                    f,
                    "no coordinate keys shared between reference ({reference_rows} rows) \
                     and reconstruction ({reconstruction_rows} rows)"
                )
            }
        }
    }
}

impl std::error::Error for CompareError {}
