//! Comparison results and their encodings.
//!
//! A [`ComparisonResult`] can be written as pretty JSON, YAML, or a
//! human-readable table. The format name is validated here, at write time.

mod table;

use crate::diff::{DiffKind, Difference};
use crate::error::{DiffError, DiffResult};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for comparison reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            _ => Err(DiffError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

/// Counts derived from a difference list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_fields: usize,
    pub equal_fields: usize,
    pub different_fields: usize,
    pub added_fields: usize,
    pub removed_fields: usize,
}

impl Summary {
    /// Recount from scratch; summaries are never updated incrementally.
    pub fn from_differences(differences: &[Difference]) -> Self {
        let mut summary = Summary {
            total_fields: differences.len(),
            ..Summary::default()
        };
        for difference in differences {
            match difference.kind {
                DiffKind::Unchanged => summary.equal_fields += 1,
                DiffKind::Modified => summary.different_fields += 1,
                DiffKind::Added => summary.added_fields += 1,
                DiffKind::Removed => summary.removed_fields += 1,
            }
        }
        summary
    }
}

/// Outcome of comparing two sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub source: String,
    pub target: String,
    pub equal: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<Difference>,
    pub summary: Summary,
}

impl ComparisonResult {
    /// Write this result in `format` to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W, format: OutputFormat) -> DiffResult<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, self)
                    .map_err(|e| DiffError::encode("json", e))?;
                writeln!(writer).map_err(|e| DiffError::io("failed to write result", e))
            }
            OutputFormat::Yaml => {
                serde_yaml::to_writer(&mut *writer, self).map_err(|e| DiffError::encode("yaml", e))
            }
            OutputFormat::Table => table::write_table(self, writer)
                .map_err(|e| DiffError::io("failed to write result", e)),
        }
    }
}

/// Parse `format` and write `result` to `sink`.
///
/// Unknown format names fail with [`DiffError::UnsupportedFormat`].
pub fn write_report<W: Write>(result: &ComparisonResult, format: &str, sink: &mut W) -> DiffResult<()> {
    let format: OutputFormat = format.parse()?;
    result.write(sink, format)
}
