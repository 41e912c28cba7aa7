// PatternDiff CLI - headless angular-pattern comparison
// Compares a reconstructed directional field against a reference measurement.

mod compare;
mod exit_codes;
mod report;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{engine_exit_code, EXIT_SUCCESS, EXIT_USAGE};
use patterndiff_engine::CompareError;

#[derive(Parser)]
#[command(name = "pdiff")]
#[command(about = "Compare a reconstructed angular field pattern against a reference")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison from a TOML config file
    #[command(after_help = "\
Examples:
  pdiff run compare.toml
  pdiff run compare.toml --json
  pdiff run compare.toml --output result.json")]
    Run {
        /// Path to the comparison config file
        config: PathBuf,

        /// Output JSON to stdout instead of only the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare two CSV files directly, without a config file
    #[command(after_help = "\
Examples:
  pdiff compare measured.csv interpolated.csv \\
      --coord-a 'Phi[deg]' --coord-b 'Theta[deg]' --value 'dB10normalize(GainTotal)'
  pdiff compare measured.csv interpolated.csv \\
      --coord-a phi --coord-b theta --value gain --top 10 --json")]
    Compare {
        /// Reference (measured) CSV file
        reference: PathBuf,

        /// Reconstruction (interpolated) CSV file
        reconstruction: PathBuf,

        /// Column holding the first angular coordinate (grid rows)
        #[arg(long)]
        coord_a: String,

        /// Column holding the second angular coordinate (grid columns)
        #[arg(long)]
        coord_b: String,

        /// Column holding the compared scalar value
        #[arg(long)]
        value: String,

        /// Number of largest-discrepancy rows to report
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Output JSON to stdout instead of only the human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a comparison config without running it
    #[command(after_help = "\
Examples:
  pdiff validate compare.toml")]
    Validate {
        /// Path to the comparison config file
        config: PathBuf,
    },

    /// Interactive heatmap viewer for the comparison grids
    #[command(after_help = "\
Examples:
  pdiff view compare.toml

Keys: Tab/1/2/3 switch grid, q quit")]
    View {
        /// Path to the comparison config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
        } => compare::cmd_run(config, json, output),
        Commands::Compare {
            reference,
            reconstruction,
            coord_a,
            coord_b,
            value,
            top,
            json,
            output,
        } => compare::cmd_compare(
            reference,
            reconstruction,
            coord_a,
            coord_b,
            value,
            top,
            json,
            output,
        ),
        Commands::Validate { config } => compare::cmd_validate(config),
        Commands::View { config } => compare::cmd_view(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    /// Create an error from an engine error with the matching exit code.
    pub fn engine(err: CompareError) -> Self {
        let hint = match &err {
            CompareError::EmptyAlignment { .. } => Some(
                "check that both files use the same angle convention \
                 (e.g. -180..180 vs 0..360)"
                    .to_string(),
            ),
            CompareError::MissingFields { .. } => {
                Some("column names must match exactly, apart from surrounding whitespace".to_string())
            }
            _ => None,
        };
        Self {
            code: engine_exit_code(&err),
            message: err.to_string(),
            hint,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
