//! Human-readable report rendering for comparison results (stderr).

use unicode_width::UnicodeWidthStr;

use patterndiff_engine::model::{AlignedRow, CompareResult};
use patterndiff_engine::FieldMapping;

/// Domain commentary on the bias sign: a positive mean difference means the
/// reconstruction reads high. Presentation-only; the engine reports the
/// signed number.
pub fn bias_label(bias: f64) -> &'static str {
    if bias > 0.0 {
        "optimistic"
    } else {
        "conservative"
    }
}

pub fn print_summary(result: &CompareResult, fields: &FieldMapping) {
    let s = &result.summary;
    eprintln!(
        "aligned {} samples: MSE {:.6}, RMSE {:.6}, bias {:+.6} ({})",
        s.aligned_rows,
        s.mse,
        s.rmse,
        s.bias,
        bias_label(s.bias)
    );

    let g = &result.grids;
    let (row_lo, row_hi) = g.row_bounds();
    let (col_lo, col_hi) = g.col_bounds();
    eprintln!(
        "grid {}x{}: {} {}..{}, {} {}..{}",
        g.row_coords.len(),
        g.col_coords.len(),
        fields.coord_a.trim(),
        row_lo,
        row_hi,
        fields.coord_b.trim(),
        col_lo,
        col_hi,
    );

    eprintln!("top {} largest differences:", result.extremes.len());
    eprint!("{}", render_extremes(&result.extremes, fields));
}

/// Render the ranked-extremes table with width-aligned columns.
pub fn render_extremes(rows: &[AlignedRow], fields: &FieldMapping) -> String {
    let headers = [
        fields.coord_a.trim(),
        fields.coord_b.trim(),
        "reference",
        "reconstruction",
        "difference",
    ];

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                format!("{}", r.coord_a),
                format!("{}", r.coord_b),
                format!("{:.4}", r.value_ref),
                format!("{:.4}", r.value_recon),
                format!("{:+.4}", r.difference),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.as_str().width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 5], widths: &[usize]) {
    for (cell, &width) in row.iter().zip(widths) {
        out.push_str("  ");
        // Right-align by display width, not char count.
        out.push_str(&" ".repeat(width - cell.as_str().width()));
        out.push_str(cell);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldMapping {
        FieldMapping {
            coord_a: "Phi[deg]".into(),
            coord_b: "Theta[deg]".into(),
            value: "gain".into(),
        }
    }

    fn row(coord_a: f64, coord_b: f64, value_ref: f64, value_recon: f64) -> AlignedRow {
        let difference = value_recon - value_ref;
        AlignedRow {
            coord_a,
            coord_b,
            value_ref,
            value_recon,
            difference,
            squared_error: difference * difference,
            abs_error: difference.abs(),
        }
    }

    #[test]
    fn bias_labels() {
        assert_eq!(bias_label(0.3), "optimistic");
        assert_eq!(bias_label(-0.3), "conservative");
        assert_eq!(bias_label(0.0), "conservative");
    }

    #[test]
    fn extremes_table_is_aligned() {
        let rows = vec![row(0.0, 0.0, 10.0, 12.0), row(270.0, 45.0, -7.5, -8.0)];
        let rendered = render_extremes(&rows, &fields());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Phi[deg]"));
        assert!(lines[0].contains("difference"));
        assert!(lines[1].contains("+2.0000"));
        assert!(lines[2].contains("-0.5000"));
        // Same display width on every line.
        assert_eq!(lines[0].len(), lines[1].len());
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn extremes_table_empty_has_header_only() {
        let rendered = render_extremes(&[], &fields());
        assert_eq!(rendered.lines().count(), 1);
    }
}
