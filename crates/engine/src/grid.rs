use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::model::{AlignedRow, AlignedTable};

// ---------------------------------------------------------------------------
// Dense grid
// ---------------------------------------------------------------------------

/// Dense row-major 2D grid. `NaN` marks cells with no aligned sample.
#[derive(Debug, Clone, Serialize)]
pub struct DenseGrid {
    pub n_rows: usize,
    pub n_cols: usize,
    pub values: Vec<f64>,
}

impl DenseGrid {
    fn filled(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            values: vec![f64::NAN; n_rows * n_cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n_cols + col]
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.n_cols + col] = value;
    }

    /// Min and max over the finite cells; None when every cell is NaN.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &v in &self.values {
            if v.is_finite() {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        bounds
    }
}

// ---------------------------------------------------------------------------
// Grid set
// ---------------------------------------------------------------------------

/// The three pixel-aligned comparison grids plus their shared axes.
///
/// Invariant: all three grids have shape
/// `(row_coords.len(), col_coords.len())` and the same coordinate-to-index
/// mapping, so differencing or overlaying cells positionally is always
/// coordinate-consistent.
#[derive(Debug, Clone, Serialize)]
pub struct GridSet {
    /// Sorted distinct coord_a values (grid rows).
    pub row_coords: Vec<f64>,
    /// Sorted distinct coord_b values (grid columns).
    pub col_coords: Vec<f64>,
    pub reconstruction: DenseGrid,
    pub reference: DenseGrid,
    pub abs_error: DenseGrid,
}

impl GridSet {
    /// (min, max) of the row coordinates, for axis labeling.
    pub fn row_bounds(&self) -> (f64, f64) {
        (self.row_coords[0], self.row_coords[self.row_coords.len() - 1])
    }

    /// (min, max) of the column coordinates, for axis labeling.
    pub fn col_bounds(&self) -> (f64, f64) {
        (self.col_coords[0], self.col_coords[self.col_coords.len() - 1])
    }
}

// ---------------------------------------------------------------------------
// Pivot
// ---------------------------------------------------------------------------

/// Pivot the aligned table into the three dense grids.
///
/// The reconstruction values define the canonical axes: their sorted
/// distinct coordinates become `row_coords` × `col_coords`. The reference
/// and error grids are then reindexed onto exactly those axes, cell by
/// cell, with NaN where a coordinate pair has no aligned row. Irregular
/// sampling therefore shows up as explicit NaN holes in all three grids
/// rather than as silently shifted rows.
pub fn to_grids(aligned: &AlignedTable) -> GridSet {
    let row_index = axis_index(aligned, |r| r.coord_a);
    let col_index = axis_index(aligned, |r| r.coord_b);

    let reconstruction = pivot(aligned, &row_index, &col_index, |r| r.value_recon);
    let reference = pivot(aligned, &row_index, &col_index, |r| r.value_ref);
    let abs_error = pivot(aligned, &row_index, &col_index, |r| r.abs_error);

    GridSet {
        row_coords: row_index.keys().map(|k| k.into_inner()).collect(),
        col_coords: col_index.keys().map(|k| k.into_inner()).collect(),
        reconstruction,
        reference,
        abs_error,
    }
}

/// Sorted distinct coordinates of one axis, mapped to their grid index.
fn axis_index(
    aligned: &AlignedTable,
    coord: impl Fn(&AlignedRow) -> f64,
) -> BTreeMap<OrderedFloat<f64>, usize> {
    let mut index: BTreeMap<OrderedFloat<f64>, usize> = aligned
        .rows
        .iter()
        .map(|r| (OrderedFloat(coord(r)), 0))
        .collect();
    for (i, slot) in index.values_mut().enumerate() {
        *slot = i;
    }
    index
}

/// Reindex one value field onto the canonical axes.
fn pivot(
    aligned: &AlignedTable,
    row_index: &BTreeMap<OrderedFloat<f64>, usize>,
    col_index: &BTreeMap<OrderedFloat<f64>, usize>,
    field: impl Fn(&AlignedRow) -> f64,
) -> DenseGrid {
    let mut grid = DenseGrid::filled(row_index.len(), col_index.len());
    for r in &aligned.rows {
        let row = row_index[&OrderedFloat(r.coord_a)];
        let col = col_index[&OrderedFloat(r.coord_b)];
        grid.set(row, col, field(r));
    }
    grid
}
