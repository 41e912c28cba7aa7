use crate::config::FieldMapping;
use crate::error::CompareError;
use crate::model::{SampleRow, SampleTable, TableId};

/// Column indices resolved from one table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub coord_a: usize,
    pub coord_b: usize,
    pub value: usize,
}

/// Resolve the three configured columns against a header row.
///
/// Both the configured names and the headers are trimmed before matching;
/// the match itself is exact. Reports every missing column at once.
pub fn validate_headers(
    table: TableId,
    headers: &[String],
    fields: &FieldMapping,
) -> Result<ResolvedColumns, CompareError> {
    let find = |name: &str| {
        let wanted = name.trim();
        headers.iter().position(|h| h.trim() == wanted)
    };

    let coord_a = find(&fields.coord_a);
    let coord_b = find(&fields.coord_b);
    let value = find(&fields.value);

    let mut missing = Vec::new();
    for (idx, name) in [
        (coord_a, &fields.coord_a),
        (coord_b, &fields.coord_b),
        (value, &fields.value),
    ] {
        if idx.is_none() {
            missing.push(name.trim().to_string());
        }
    }

    match (coord_a, coord_b, value) {
        (Some(coord_a), Some(coord_b), Some(value)) => Ok(ResolvedColumns {
            coord_a,
            coord_b,
            value,
        }),
        _ => Err(CompareError::MissingFields {
            table,
            fields: missing,
        }),
    }
}

/// Load CSV text into a typed sample table.
///
/// Every configured cell must parse as a number; an empty or malformed cell
/// is an error carrying the 1-based source line, not a silent NaN.
pub fn load_table(
    table: TableId,
    csv_data: &str,
    fields: &FieldMapping,
) -> Result<SampleTable, CompareError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CompareError::CsvParse {
            table,
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let cols = validate_headers(table, &headers, fields)?;

    let parse_cell = |record: &csv::StringRecord, idx: usize, column: &str, line: usize| {
        let raw = record.get(idx).unwrap_or("").trim();
        raw.parse::<f64>().map_err(|_| CompareError::ValueParse {
            table,
            line,
            column: column.trim().to_string(),
            value: raw.to_string(),
        })
    };

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        // Header occupies line 1.
        let line = i + 2;
        let record = record.map_err(|e| CompareError::CsvParse {
            table,
            message: e.to_string(),
        })?;

        rows.push(SampleRow {
            coord_a: parse_cell(&record, cols.coord_a, &fields.coord_a, line)?,
            coord_b: parse_cell(&record, cols.coord_b, &fields.coord_b, line)?,
            value: parse_cell(&record, cols.value, &fields.value, line)?,
        });
    }

    Ok(SampleTable { id: table, rows })
}
