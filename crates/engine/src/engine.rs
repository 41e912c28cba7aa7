use crate::align::align;
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::grid::to_grids;
use crate::model::{CompareMeta, CompareResult, SampleTable};
use crate::stats::{summarize, top_errors};

/// Pre-loaded input tables for one comparison run.
pub struct CompareInput {
    pub reference: SampleTable,
    pub reconstruction: SampleTable,
}

/// Run one comparison. Pure pipeline: align, then derive summary, ranked
/// extremes, and the dense grids from the aligned table. Any failure is
/// terminal; no partial result is produced.
pub fn run(config: &CompareConfig, input: &CompareInput) -> Result<CompareResult, CompareError> {
    let aligned = align(&input.reference, &input.reconstruction)?;

    let summary = summarize(&aligned);
    let extremes = top_errors(&aligned, config.report.top_n);
    let grids = to_grids(&aligned);

    Ok(CompareResult {
        meta: CompareMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        extremes,
        grids,
    })
}
