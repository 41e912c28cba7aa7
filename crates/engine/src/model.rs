use serde::Serialize;

use crate::grid::GridSet;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the two input tables a row or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableId {
    Reference,
    Reconstruction,
}

impl TableId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableId::Reference => "reference",
            TableId::Reconstruction => "reconstruction",
        }
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed sample: two angular coordinates and the measured value.
///
/// Column-name lookup happens once, at ingestion; everything downstream
/// operates on these fields directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub coord_a: f64,
    pub coord_b: f64,
    pub value: f64,
}

/// An ordered collection of samples from one source.
#[derive(Debug, Clone)]
pub struct SampleTable {
    pub id: TableId,
    pub rows: Vec<SampleRow>,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// One joined row plus its derived error columns.
///
/// `difference` is reconstruction minus reference; a positive value means
/// the reconstruction overshoots.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlignedRow {
    pub coord_a: f64,
    pub coord_b: f64,
    pub value_ref: f64,
    pub value_recon: f64,
    pub difference: f64,
    pub squared_error: f64,
    pub abs_error: f64,
}

/// Inner join of the reference and reconstruction tables on the exact
/// (coord_a, coord_b) key. Rows keep the reference table's original order.
/// Non-empty by construction: the empty join is an error at alignment time.
#[derive(Debug, Clone, Serialize)]
pub struct AlignedTable {
    pub rows: Vec<AlignedRow>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Aggregate error statistics over an aligned table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorSummary {
    pub aligned_rows: usize,
    /// Mean of `squared_error`.
    pub mse: f64,
    /// Square root of `mse`.
    pub rmse: f64,
    /// Mean of `difference`. Sign indicates systematic over- or
    /// under-estimation by the reconstruction.
    pub bias: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// The complete result of one comparison run: an explicit value object
/// handed to whatever renders it. No state outlives the run.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    pub meta: CompareMeta,
    pub summary: ErrorSummary,
    /// The rows with the largest squared error, descending.
    pub extremes: Vec<AlignedRow>,
    pub grids: GridSet,
}
