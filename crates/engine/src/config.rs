use serde::Deserialize;

use crate::error::CompareError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    pub name: String,
    pub fields: FieldMapping,
    pub tables: TablesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Column names shared by both input tables. Matched against CSV headers by
/// exact name after trimming incidental whitespace on both sides.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    /// Column holding the first angular coordinate (grid rows).
    pub coord_a: String,
    /// Column holding the second angular coordinate (grid columns).
    pub coord_b: String,
    /// Column holding the compared scalar value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub reference: TableConfig,
    pub reconstruction: TableConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub file: String,
}

// ---------------------------------------------------------------------------
// Report + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of largest-discrepancy rows to report.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CompareConfig {
    pub fn from_toml(input: &str) -> Result<Self, CompareError> {
        let config: CompareConfig =
            toml::from_str(input).map_err(|e| CompareError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompareError> {
        let fields = [
            ("fields.coord_a", self.fields.coord_a.trim()),
            ("fields.coord_b", self.fields.coord_b.trim()),
            ("fields.value", self.fields.value.trim()),
        ];

        for (name, value) in &fields {
            if value.is_empty() {
                return Err(CompareError::ConfigValidation(format!(
                    "{name} must not be empty"
                )));
            }
        }

        // The three columns must be distinct: a coordinate column doubling
        // as the value column cannot form a valid join + comparison.
        for i in 0..fields.len() {
            for j in (i + 1)..fields.len() {
                if fields[i].1 == fields[j].1 {
                    return Err(CompareError::ConfigValidation(format!(
                        "{} and {} both name column '{}'",
                        fields[i].0, fields[j].0, fields[i].1
                    )));
                }
            }
        }

        if self.report.top_n == 0 {
            return Err(CompareError::ConfigValidation(
                "report.top_n must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
