//! Structural comparison of two documents.
//!
//! This module provides:
//! - [`CompareOptions`], the immutable knobs for one comparison
//! - [`diff`], the recursive path-tracking differ over [`Value`] trees
//! - [`compare`], which loads two sources and builds a [`ComparisonResult`]

mod engine;
pub mod path;

pub use engine::{DiffOutcome, diff};
pub use path::{IgnorePattern, Path, Segment};

use crate::error::{DiffError, DiffResult};
use crate::report::{ComparisonResult, Summary};
use crate::source::load;
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::info;

/// Classification of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl DiffKind {
    /// Whether this kind makes the documents unequal.
    pub fn is_change(self) -> bool {
        !matches!(self, DiffKind::Unchanged)
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::Added => write!(f, "added"),
            DiffKind::Removed => write!(f, "removed"),
            DiffKind::Modified => write!(f, "modified"),
            DiffKind::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// One path-tagged finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: DiffKind,
    /// Value on the source side, absent for additions
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub source: Option<Value>,
    /// Value on the target side, absent for removals
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub target: Option<Value>,
    pub message: String,
}

/// A side that appears in the document is `Some`, even when it holds `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Options for one comparison.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Compare strings case-insensitively
    pub ignore_case: bool,
    /// Paths to leave out of the comparison entirely
    pub ignore_fields: Vec<IgnorePattern>,
    /// Emit `unchanged` entries for equal nodes
    pub show_unchanged: bool,
    /// Output format name; validated by the reporter, not here
    pub format: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_case: false,
            ignore_fields: Vec::new(),
            show_unchanged: false,
            format: "json".to_string(),
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Compile and add ignore patterns. Blank entries are skipped.
    pub fn with_ignore_fields<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_fields.extend(
            patterns
                .into_iter()
                .filter(|p| !p.as_ref().trim().is_empty())
                .map(|p| IgnorePattern::parse(p.as_ref())),
        );
        self
    }

    pub fn with_show_unchanged(mut self, show_unchanged: bool) -> Self {
        self.show_unchanged = show_unchanged;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Whether `path` is covered by an ignore pattern.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_fields.iter().any(|p| p.matches(path))
    }
}

/// Load both sources and compare them.
pub fn compare(source: &str, target: &str, options: &CompareOptions) -> DiffResult<ComparisonResult> {
    let source_value = load(source).map_err(|e| DiffError::load("source", e))?;
    let target_value = load(target).map_err(|e| DiffError::load("target", e))?;

    let outcome = diff(&source_value, &target_value, options);
    let summary = Summary::from_differences(&outcome.differences);

    info!(
        source,
        target,
        equal = outcome.equal,
        differences = outcome.differences.len(),
        "comparison finished"
    );

    Ok(ComparisonResult {
        source: source.to_string(),
        target: target.to_string(),
        equal: outcome.equal,
        differences: outcome.differences,
        summary,
    })
}
