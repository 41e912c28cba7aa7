//! Command bodies for `pdiff run`, `compare`, `validate`, and `view`.

use std::path::{Path, PathBuf};

use patterndiff_engine::config::{OutputConfig, ReportConfig, TableConfig, TablesConfig};
use patterndiff_engine::ingest::load_table;
use patterndiff_engine::model::CompareResult;
use patterndiff_engine::{run, CompareConfig, CompareInput, FieldMapping, TableId};

use crate::exit_codes::EXIT_ERROR;
use crate::report;
use crate::tui;
use crate::CliError;

fn read_config(path: &Path) -> Result<CompareConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::usage(format!("cannot read {}: {e}", path.display())))?;
    CompareConfig::from_toml(&config_str).map_err(CliError::engine)
}

/// Load both CSV tables, resolving paths relative to the config location.
fn load_input(config: &CompareConfig, base_dir: &Path) -> Result<CompareInput, CliError> {
    let load = |table: TableId, file: &str| {
        let path = base_dir.join(file);
        let csv_data = std::fs::read_to_string(&path).map_err(|e| {
            CliError::usage(format!("cannot read {}: {e}", path.display()))
                .with_hint("table paths are resolved relative to the config file")
        })?;
        load_table(table, &csv_data, &config.fields).map_err(CliError::engine)
    };

    Ok(CompareInput {
        reference: load(TableId::Reference, &config.tables.reference.file)?,
        reconstruction: load(TableId::Reconstruction, &config.tables.reconstruction.file)?,
    })
}

fn execute(config: &CompareConfig, base_dir: &Path) -> Result<CompareResult, CliError> {
    let input = load_input(config, base_dir)?;
    run(config, &input).map_err(CliError::engine)
}

/// Emit JSON (stdout and/or file) and the human summary (stderr).
fn emit(
    config: &CompareConfig,
    base_dir: &Path,
    result: &CompareResult,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(result)
        .map_err(|e| CliError::usage(format!("JSON serialization error: {e}")))?;

    // --output wins over the config's [output] json path.
    let output_path = output_file.or_else(|| {
        config
            .output
            .json
            .as_ref()
            .map(|file| base_dir.join(file))
    });

    if let Some(ref path) = output_path {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::usage(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    report::print_summary(result, &config.fields);

    Ok(())
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let result = execute(&config, &base_dir)?;
    emit(&config, &base_dir, &result, json_output, output_file)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_compare(
    reference: PathBuf,
    reconstruction: PathBuf,
    coord_a: String,
    coord_b: String,
    value: String,
    top: usize,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let stem = |path: &Path| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    };

    let config = CompareConfig {
        name: format!("{} vs {}", stem(&reconstruction), stem(&reference)),
        fields: FieldMapping {
            coord_a,
            coord_b,
            value,
        },
        tables: TablesConfig {
            reference: TableConfig {
                file: reference.display().to_string(),
            },
            reconstruction: TableConfig {
                file: reconstruction.display().to_string(),
            },
        },
        report: ReportConfig { top_n: top },
        output: OutputConfig::default(),
    };
    config.validate().map_err(CliError::engine)?;

    let base_dir = PathBuf::from(".");
    let result = execute(&config, &base_dir)?;
    emit(&config, &base_dir, &result, json_output, output_file)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    println!(
        "ok: '{}' ({} / {} -> {})",
        config.name,
        config.fields.coord_a.trim(),
        config.fields.coord_b.trim(),
        config.fields.value.trim()
    );
    Ok(())
}

pub fn cmd_view(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let result = execute(&config, &base_dir)?;

    tui::run_viewer(&result, &config.fields).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("viewer error: {e}"),
        hint: None,
    })
}
