//! Node paths and ignore patterns.
//!
//! Paths render as `$`, `$.key`, `$.list[0].key`. Ignore patterns use the same
//! syntax, with the leading `$.` optional, `*` matching any single key and
//! `[*]` matching any single index.

use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a node within a value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The document root, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) if needs_brackets(key) => {
                    let quote = if key.contains('"') { '\'' } else { '"' };
                    write!(f, "[{quote}{key}{quote}]")?
                }
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Keys that would read back as something else in dotted form.
fn needs_brackets(key: &str) -> bool {
    key.is_empty() || key == "*" || key.contains(['.', '[', ']'])
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Key(String),
    AnyKey,
    Index(usize),
    AnyIndex,
}

impl PatternSegment {
    fn matches(&self, segment: &Segment) -> bool {
        match (self, segment) {
            (PatternSegment::Key(want), Segment::Key(got)) => want == got,
            (PatternSegment::AnyKey, Segment::Key(_)) => true,
            (PatternSegment::Index(want), Segment::Index(got)) => want == got,
            (PatternSegment::AnyIndex, Segment::Index(_)) => true,
            _ => false,
        }
    }
}

/// A compiled ignore rule. Matching a node suppresses it and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePattern {
    raw: String,
    segments: Vec<PatternSegment>,
}

impl IgnorePattern {
    /// Compile a pattern such as `$.users[*].password` or `metadata.updated_at`.
    ///
    /// Bracket content that is not a number or `*` is treated as a quoted key,
    /// so `a["b.c"]` and `a[b.c]` both address the key `b.c`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix('$')
            .map(|rest| rest.strip_prefix('.').unwrap_or(rest))
            .unwrap_or(trimmed);

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = body.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => flush_key(&mut key, &mut segments),
                '[' => {
                    flush_key(&mut key, &mut segments);
                    let mut inner = String::new();
                    let mut quote = None;
                    for c in chars.by_ref() {
                        match quote {
                            Some(open) if c == open => quote = None,
                            Some(_) => {}
                            None if c == ']' => break,
                            None if c == '"' || c == '\'' => quote = Some(c),
                            None => {}
                        }
                        inner.push(c);
                    }
                    segments.push(bracket_segment(&inner));
                }
                _ => key.push(c),
            }
        }
        flush_key(&mut key, &mut segments);

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// Source text of the pattern.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &Path) -> bool {
        let segments = path.segments();
        self.segments.len() == segments.len()
            && self
                .segments
                .iter()
                .zip(segments)
                .all(|(pattern, segment)| pattern.matches(segment))
    }
}

fn flush_key(key: &mut String, segments: &mut Vec<PatternSegment>) {
    if key.is_empty() {
        return;
    }
    let segment = if key == "*" {
        PatternSegment::AnyKey
    } else {
        PatternSegment::Key(key.clone())
    };
    segments.push(segment);
    key.clear();
}

fn bracket_segment(inner: &str) -> PatternSegment {
    let inner = inner.trim();
    if inner == "*" {
        return PatternSegment::AnyIndex;
    }
    if let Ok(index) = inner.parse::<usize>() {
        return PatternSegment::Index(index);
    }
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);
    PatternSegment::Key(unquoted.to_string())
}
