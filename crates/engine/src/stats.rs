use std::cmp::Ordering;

use crate::model::{AlignedRow, AlignedTable, ErrorSummary};

/// Compute aggregate error statistics.
///
/// The aligned table is non-empty by construction (`align` rejects the
/// empty join), so the means are always defined.
pub fn summarize(aligned: &AlignedTable) -> ErrorSummary {
    let n = aligned.rows.len() as f64;
    let mse = aligned.rows.iter().map(|r| r.squared_error).sum::<f64>() / n;
    let bias = aligned.rows.iter().map(|r| r.difference).sum::<f64>() / n;

    ErrorSummary {
        aligned_rows: aligned.rows.len(),
        mse,
        rmse: mse.sqrt(),
        bias,
    }
}

/// The `n` rows with the largest squared error, descending.
///
/// The sort is stable, so ties keep the aligned table's row order. Returns
/// all rows when the table has fewer than `n`.
pub fn top_errors(aligned: &AlignedTable, n: usize) -> Vec<AlignedRow> {
    let mut rows = aligned.rows.clone();
    rows.sort_by(|a, b| {
        b.squared_error
            .partial_cmp(&a.squared_error)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(n);
    rows
}
