//! Source loading.
//!
//! An identifier that names an existing file is read and parsed with an ordered
//! attempt policy: JSON, then YAML, then the raw text. Identifiers that are not
//! files are compared as literal strings.

use crate::error::{DiffError, DiffResult};
use crate::value::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Which parser produced a loaded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    Text,
    /// The identifier itself, because it did not name a file.
    Literal,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Yaml => write!(f, "yaml"),
            SourceFormat::Text => write!(f, "text"),
            SourceFormat::Literal => write!(f, "literal"),
        }
    }
}

/// Resolve an identifier to a value.
///
/// Only read failures on an existing path are errors; unparseable content
/// degrades to a string value.
pub fn load(identifier: &str) -> DiffResult<Value> {
    load_with_format(identifier).map(|(value, _)| value)
}

/// Like [`load`], also reporting which parser succeeded.
pub fn load_with_format(identifier: &str) -> DiffResult<(Value, SourceFormat)> {
    let path = Path::new(identifier);
    if std::fs::metadata(path).is_err() {
        debug!(identifier, "not a file, comparing identifier as a literal string");
        return Ok((Value::String(identifier.to_string()), SourceFormat::Literal));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| DiffError::io(format!("failed to read file '{}'", path.display()), e))?;
    let bytes = maybe_decompress(bytes);

    let (value, format) = parse_document(&bytes);
    debug!(identifier, %format, size = bytes.len(), "loaded source");
    Ok((value, format))
}

/// Parse raw content, returning the first successful interpretation.
pub fn parse_document(bytes: &[u8]) -> (Value, SourceFormat) {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => return (value, SourceFormat::Json),
        Err(e) => trace!(error = %e, "content is not JSON"),
    }

    match parse_yaml(bytes) {
        Ok(value) => return (value, SourceFormat::Yaml),
        Err(e) => trace!(error = %e, "content is not YAML"),
    }

    (
        Value::String(String::from_utf8_lossy(bytes).into_owned()),
        SourceFormat::Text,
    )
}

fn parse_yaml(bytes: &[u8]) -> Result<Value, serde_yaml::Error> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    yaml.apply_merge()?;
    Ok(Value::from(yaml))
}

/// Transparently inflate gzip content. Anything that fails to inflate is
/// returned untouched and parsed as-is.
fn maybe_decompress(bytes: Vec<u8>) -> Vec<u8> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return bytes;
    }

    let mut decoder = flate2::read::GzDecoder::new(bytes.as_slice());
    let mut inflated = Vec::new();
    match decoder.read_to_end(&mut inflated) {
        Ok(_) => inflated,
        Err(e) => {
            debug!(error = %e, "gzip header found but content did not inflate");
            bytes
        }
    }
}
