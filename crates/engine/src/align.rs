use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::error::{CompareError, DuplicateKey};
use crate::model::{AlignedRow, AlignedTable, SampleRow, SampleTable};

/// Exact-equality join key over the two angular coordinates.
type CoordKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn coord_key(row: &SampleRow) -> CoordKey {
    (OrderedFloat(row.coord_a), OrderedFloat(row.coord_b))
}

/// Reject tables in which a coordinate key appears more than once.
/// A duplicated key would silently multiply joined rows.
fn check_duplicates(table: &SampleTable) -> Result<(), CompareError> {
    let mut counts: BTreeMap<CoordKey, usize> = BTreeMap::new();
    for row in &table.rows {
        *counts.entry(coord_key(row)).or_insert(0) += 1;
    }

    let duplicates: Vec<DuplicateKey> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((a, b), count)| DuplicateKey {
            coord_a: a.into_inner(),
            coord_b: b.into_inner(),
            count,
        })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CompareError::DuplicateKeys {
            table: table.id,
            duplicates,
        })
    }
}

/// Inner join on the exact (coord_a, coord_b) key.
///
/// Both coordinates must match simultaneously; there is no tolerance and no
/// range normalization (a reference in [-180, 180] and a reconstruction in
/// [0, 360) share no keys and fail with `EmptyAlignment`). Rows whose key
/// exists in only one table are dropped. Output rows keep the reference
/// table's original order.
pub fn align(
    reference: &SampleTable,
    reconstruction: &SampleTable,
) -> Result<AlignedTable, CompareError> {
    check_duplicates(reference)?;
    check_duplicates(reconstruction)?;

    let recon_map: BTreeMap<CoordKey, &SampleRow> = reconstruction
        .rows
        .iter()
        .map(|row| (coord_key(row), row))
        .collect();

    let mut rows = Vec::new();

    for ref_row in &reference.rows {
        if let Some(recon_row) = recon_map.get(&coord_key(ref_row)) {
            let difference = recon_row.value - ref_row.value;
            rows.push(AlignedRow {
                coord_a: ref_row.coord_a,
                coord_b: ref_row.coord_b,
                value_ref: ref_row.value,
                value_recon: recon_row.value,
                difference,
                squared_error: difference * difference,
                abs_error: difference.abs(),
            });
        }
    }

    if rows.is_empty() {
        return Err(CompareError::EmptyAlignment {
            reference_rows: reference.rows.len(),
            reconstruction_rows: reconstruction.rows.len(),
        });
    }

    Ok(AlignedTable { rows })
}
