//! Recursive lock-step walk over two value trees.
//!
//! Nodes are visited depth-first in pre-order. Map children follow source key
//! order, then target-only keys; list children are compared by position.

use super::path::Path;
use super::{CompareOptions, DiffKind, Difference};
use crate::value::{Map, Value};
use serde_json::Number;
use tracing::debug;

/// Rendered values longer than this are shortened in messages.
const MESSAGE_VALUE_LIMIT: usize = 60;

/// What the differ found.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOutcome {
    /// True iff no added, removed or modified entries were produced
    pub equal: bool,
    /// Findings in visit order
    pub differences: Vec<Difference>,
}

/// Compare two values under `options`.
pub fn diff(source: &Value, target: &Value, options: &CompareOptions) -> DiffOutcome {
    let mut walker = Walker {
        options,
        path: Path::root(),
        differences: Vec::new(),
    };
    walker.visit(Some(source), Some(target));

    let equal = !walker.differences.iter().any(|d| d.kind.is_change());
    debug!(
        equal,
        differences = walker.differences.len(),
        ignore_patterns = options.ignore_fields.len(),
        "structural diff complete"
    );

    DiffOutcome {
        equal,
        differences: walker.differences,
    }
}

struct Walker<'a> {
    options: &'a CompareOptions,
    path: Path,
    differences: Vec<Difference>,
}

impl Walker<'_> {
    /// Visit the node at the current path. `None` means the side lacks it.
    fn visit(&mut self, source: Option<&Value>, target: Option<&Value>) {
        if self.options.is_ignored(&self.path) {
            return;
        }

        match (source, target) {
            (Some(s), Some(t)) => self.compare_present(s, t),
            (Some(s), None) => self.record(DiffKind::Removed, Some(s), None, "field removed".into()),
            (None, Some(t)) => self.record(DiffKind::Added, None, Some(t), "field added".into()),
            (None, None) => {}
        }
    }

    fn compare_present(&mut self, source: &Value, target: &Value) {
        match (source, target) {
            (Value::Null, Value::Null) => self.unchanged(source, target),
            (Value::Bool(a), Value::Bool(b)) => self.scalar(source, target, a == b),
            (Value::Number(a), Value::Number(b)) => {
                self.scalar(source, target, numbers_equal(a, b))
            }
            (Value::String(a), Value::String(b)) => {
                let equal = if self.options.ignore_case {
                    a.to_lowercase() == b.to_lowercase()
                } else {
                    a == b
                };
                self.scalar(source, target, equal)
            }
            (Value::Map(a), Value::Map(b)) => self.compare_maps(a, b),
            (Value::List(a), Value::List(b)) => self.compare_lists(a, b),
            _ => {
                let message = format!(
                    "type changed from {} to {}",
                    source.type_name(),
                    target.type_name()
                );
                self.record(DiffKind::Modified, Some(source), Some(target), message);
            }
        }
    }

    fn scalar(&mut self, source: &Value, target: &Value, equal: bool) {
        if equal {
            self.unchanged(source, target);
        } else {
            let message = format!(
                "value changed from {} to {}",
                brief(source),
                brief(target)
            );
            self.record(DiffKind::Modified, Some(source), Some(target), message);
        }
    }

    fn unchanged(&mut self, source: &Value, target: &Value) {
        if self.options.show_unchanged {
            self.record(
                DiffKind::Unchanged,
                Some(source),
                Some(target),
                "values are equal".into(),
            );
        }
    }

    fn compare_maps(&mut self, source: &Map, target: &Map) {
        for (key, source_value) in source {
            self.path.push_key(key);
            self.visit(Some(source_value), target.get(key));
            self.path.pop();
        }

        for (key, target_value) in target.iter().filter(|(k, _)| !source.contains_key(*k)) {
            self.path.push_key(key);
            self.visit(None, Some(target_value));
            self.path.pop();
        }
    }

    fn compare_lists(&mut self, source: &[Value], target: &[Value]) {
        let longest = source.len().max(target.len());
        for index in 0..longest {
            self.path.push_index(index);
            self.visit(source.get(index), target.get(index));
            self.path.pop();
        }
    }

    fn record(
        &mut self,
        kind: DiffKind,
        source: Option<&Value>,
        target: Option<&Value>,
        message: String,
    ) {
        self.differences.push(Difference {
            path: self.path.to_string(),
            kind,
            source: source.cloned(),
            target: target.cloned(),
            message,
        });
    }
}

/// Compare two numbers, ignoring floating point precision issues.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < 1e-10,
        _ => false,
    }
}

/// Render a value for a message, shortening long renderings.
fn brief(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > MESSAGE_VALUE_LIMIT {
        let head: String = rendered.chars().take(MESSAGE_VALUE_LIMIT - 3).collect();
        format!("{}...", head)
    } else {
        rendered
    }
}
